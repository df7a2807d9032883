use arch::EncodeError;
use color_print::ceprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid instruction: `{0}`")]
    InvalidInstruction(String),

    #[error("invalid operand: `{0}`")]
    InvalidOperand(String),

    #[error("register out of range: `{0}` (r0..r7)")]
    RegisterOutOfRange(String),

    #[error("{0}")]
    Encode(#[from] EncodeError),

    #[error("duplicate label: `{0}`, first defined on line {1}")]
    DuplicateLabel(String, usize),

    #[error("undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("program too large: more than {0} words")]
    ProgramTooLarge(usize),
}

/// An error tied to the source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diag {
    pub error: Error,
    /// 0-based line index
    pub line: usize,
    pub text: String,
}

impl Diag {
    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str) {
        ceprintln!("<red,bold>error</>: {}", self.error);

        // line is 0-based, display as 1-based
        let line_num = self.line + 1;
        ceprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", line_num, self.text);
        ceprintln!("      <blue>|</>");
    }
}
