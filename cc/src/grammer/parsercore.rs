use super::token::{Pos, Token, TokenKind};
use crate::error::{Error, LexError};
use std::iter::Peekable;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    lex_error: Option<(LexError, Pos)>,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
            lex_error: None,
        }
    }

    /// First lexical error seen so far
    pub fn take_lex_error(&mut self) -> Option<Error> {
        self.lex_error.take().map(|(e, pos)| Error::Lex(e, pos))
    }

    /// Pull the remaining input through the lexer
    pub fn drain(&mut self) {
        while self.next().is_some() {}
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Skip all invalid tokens, remembering the first one
    fn skip(&mut self) {
        while let Some(token) = self.tokens.next_if(|t| matches!(t.kind, TokenKind::Error(_))) {
            if let TokenKind::Error(e) = token.kind {
                if self.lex_error.is_none() {
                    self.lex_error = Some((e, token.pos));
                }
            }
        }
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip();
        self.tokens.peek()
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.skip();
        self.tokens.next()
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.peek().is_some_and(cond)
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        self.skip();
        self.tokens.next_if(|token| cond(token))
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Result<Token, Error> {
        self.skip();
        match self.tokens.peek().cloned() {
            Some(token) if cond(&token) => {
                self.tokens.next();
                Ok(token)
            }
            Some(Token {
                kind: TokenKind::Eof,
                pos,
            }) => Err(Error::UnexpectedEOF(pos)),
            Some(token) => Err(Error::UnexpectedToken(token)),
            None => Err(Error::UnexpectedEOF(Pos::default())),
        }
    }
}

#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:pat) => {
        $parser.check_if(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:pat) => {
        $parser.expect_tobe(|token| matches!(&token.kind, $kind))
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $trigger:pat, $following:expr) => {
        if check!($parser, $trigger) {
            expect!($parser, $trigger)?;
            Some($following)
        } else {
            None
        }
    };
    ($parser:expr, $trigger:pat) => {
        $parser.consume_if(|token| matches!(&token.kind, $trigger))
    };
}
