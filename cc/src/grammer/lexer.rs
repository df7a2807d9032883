use super::token::{Pos, Token, TokenKind};
use crate::error::LexError;
use arch::field::IMM8;
use std::iter::Peekable;
use std::str::CharIndices;

/// Lazy tokenizer over a whole source text.
///
/// Yields exactly one `Eof` token after the input is exhausted, then stops.
/// Invalid input produces `TokenKind::Error` tokens instead of failing, so the
/// parser decides how to report them.
pub struct Lexer<'a> {
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    line: usize,
    line_start: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            code,
            iter: code.char_indices().peekable(),
            line: 1,
            line_start: 0,
            done: false,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        let next = self.iter.next();
        if let Some((idx, '\n')) = next {
            self.line += 1;
            self.line_start = idx + 1;
        }
        next
    }

    fn pos(&self, idx: usize) -> Pos {
        Pos {
            line: self.line,
            col: self.code[self.line_start..idx].chars().count() + 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Tokenizer
// ----------------------------------------------------------------------------

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        // 0. Skip whitespaces (newlines included)
        while let Some((_, ch)) = self.peek_nth(0) {
            if !ch.is_whitespace() {
                break;
            }
            self.consume();
        }

        let Some((idx, ch0)) = self.peek_nth(0) else {
            self.done = true;
            return Some(Token::new(TokenKind::Eof, self.pos(self.code.len())));
        };
        let pos = self.pos(idx);

        // 1. Double character token
        if let Some((_, ch1)) = self.peek_nth(1) {
            if let Some(kind) = double_char_token(ch0, ch1) {
                self.consume();
                self.consume();
                return Some(Token::new(kind, pos));
            }
        }

        // 2. Single character token
        if let Some(kind) = single_char_token(ch0) {
            self.consume();
            return Some(Token::new(kind, pos));
        }

        // 3. Number literal
        if ch0.is_ascii_digit() {
            return Some(Token::new(self.parse_number(), pos));
        }

        // 4. Identifier
        if ch0.is_ascii_alphabetic() || ch0 == '_' {
            return Some(Token::new(self.parse_ident(), pos));
        }

        // Error
        self.consume();
        Some(Token::new(TokenKind::Error(LexError::InvalidChar(ch0)), pos))
    }
}

impl<'a> Lexer<'a> {
    fn parse_ident(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some((_, ch)) = self
            .iter
            .next_if(|(_, ch)| matches!(ch, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z'))
        {
            lexeme.push(ch);
        }
        match lexeme.as_str() {
            "return" => TokenKind::Return,
            _ => TokenKind::Ident(lexeme),
        }
    }

    /// Decimal, or hexadecimal after `0x`.
    fn parse_number(&mut self) -> TokenKind {
        let hex = matches!(
            (self.peek_nth(0), self.peek_nth(1), self.peek_nth(2)),
            (Some((_, '0')), Some((_, 'x' | 'X')), Some((_, ch))) if ch.is_ascii_hexdigit()
        );
        let (mut lexeme, radix) = if hex {
            self.consume();
            self.consume();
            (String::from("0x"), 16)
        } else {
            (String::new(), 10)
        };
        let start = lexeme.len();
        while let Some((_, ch)) = self.iter.next_if(|(_, ch)| ch.is_digit(radix)) {
            lexeme.push(ch);
        }
        match u64::from_str_radix(&lexeme[start..], radix) {
            Ok(num) if num <= IMM8.max() as u64 => TokenKind::Number(num as u16),
            _ => TokenKind::Error(LexError::NumberOutOfRange(lexeme)),
        }
    }
}

fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    match (ch0, ch1) {
        ('=', '=') => Some(TokenKind::EqualEqual),
        ('!', '=') => Some(TokenKind::ExclEqual),
        ('<', '=') => Some(TokenKind::LAngleEqual),
        ('>', '=') => Some(TokenKind::RAngleEqual),
        _ => None,
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '=' => Some(TokenKind::Equal),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '<' => Some(TokenKind::LAngle),
        '>' => Some(TokenKind::RAngle),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        ';' => Some(TokenKind::Semicolon),
        _ => None,
    }
}
