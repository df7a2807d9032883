use crate::grammer::token::{Pos, Token};
use color_print::ceprintln;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized character `{0}`")]
    InvalidChar(char),

    #[error("number out of range: `{0}` (0..=255)")]
    NumberOutOfRange(String),
}

// Unified error type for MINCC
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("lex error: {0}")]
    Lex(LexError, Pos),

    #[error("parse error: unexpected end of input")]
    UnexpectedEOF(Pos),

    #[error("parse error: unexpected {0}")]
    UnexpectedToken(Token),

    #[error("parse error: invalid assignment target")]
    InvalidAssignmentTarget(Pos),

    #[error("parse error: empty program")]
    EmptyProgram,

    #[error("compile error: too many variables: `{0}` needs slot {1}, limit is {2}")]
    TooManyVariables(String, usize, usize),
}

impl Error {
    pub fn pos(&self) -> Option<Pos> {
        match self {
            Error::Lex(_, pos) | Error::UnexpectedEOF(pos) | Error::InvalidAssignmentTarget(pos) => {
                Some(*pos)
            }
            Error::UnexpectedToken(token) => Some(token.pos),
            Error::Io(_) | Error::EmptyProgram | Error::TooManyVariables(..) => None,
        }
    }

    /// Print error with the offending source line and a caret under the column
    pub fn print_diag(&self, file: &str, code: &str) {
        ceprintln!("<red,bold>error</>: {}", self);

        let Some(pos) = self.pos() else {
            ceprintln!("     <blue>--></> <underline>{}</>", file);
            return;
        };
        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, pos);
        ceprintln!("      <blue>|</>");

        let line_content = code.lines().nth(pos.line.saturating_sub(1)).unwrap_or("");
        ceprintln!(" <blue>{:>4} |</> {}", pos.line, line_content);
        ceprintln!(
            "      <blue>|</> {}<red,bold>^</>",
            " ".repeat(pos.col.saturating_sub(1))
        );
    }
}
