use crate::error::LexError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, pos: Pos) -> Self {
        Token { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Double character tokens
    EqualEqual,  // '=='
    ExclEqual,   // '!='
    LAngleEqual, // '<='
    RAngleEqual, // '>='

    // Single character tokens
    Equal,     // '='
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    LAngle,    // '<'
    RAngle,    // '>'
    LParen,    // '('
    RParen,    // ')'
    Semicolon, // ';'

    // Keyword
    Return,

    // Identifier
    Ident(String),

    // Literal
    Number(u16),

    // Special
    Error(LexError),
    Eof,
}

/// 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        let s = match self {
            EqualEqual => "==",
            ExclEqual => "!=",
            LAngleEqual => "<=",
            RAngleEqual => ">=",
            Equal => "=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            LAngle => "<",
            RAngle => ">",
            LParen => "(",
            RParen => ")",
            Semicolon => ";",
            Return => "return",
            Ident(name) => return write!(f, "identifier `{name}`"),
            Number(n) => return write!(f, "number `{n}`"),
            Error(e) => return write!(f, "{e}"),
            Eof => return write!(f, "end of input"),
        };
        write!(f, "`{s}`")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}
