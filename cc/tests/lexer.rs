use mincc::grammer::token::{Pos, TokenKind};
use mincc::{Lexer, LexError};

fn case(code: &str, expects: Vec<TokenKind>) {
    let tokens: Vec<_> = Lexer::new(code).collect();

    println!(" {code}");
    for (idx, token) in tokens.iter().enumerate() {
        println!("{:>2}: {:?} at {}", idx, token.kind, token.pos);
    }

    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, expects);
}

#[test]
fn operators() {
    use TokenKind::*;
    case(
        "a = (1 + 2) * 3 - b;",
        vec![
            Ident(format!("a")),
            Equal,
            LParen,
            Number(1),
            Plus,
            Number(2),
            RParen,
            Star,
            Number(3),
            Minus,
            Ident(format!("b")),
            Semicolon,
            Eof,
        ],
    );
}

#[test]
fn maximal_munch() {
    use TokenKind::*;
    case(
        "== != <= >= < > = ===",
        vec![
            EqualEqual,
            ExclEqual,
            LAngleEqual,
            RAngleEqual,
            LAngle,
            RAngle,
            Equal,
            EqualEqual,
            Equal,
            Eof,
        ],
    );
    case("1<=2", vec![Number(1), LAngleEqual, Number(2), Eof]);
}

#[test]
fn whitespace_and_newlines() {
    use TokenKind::*;
    case("  x1_\n\t+\r\n 42 ", vec![Ident(format!("x1_")), Plus, Number(42), Eof]);
    case("", vec![Eof]);
}

#[test]
fn literal_range() {
    use TokenKind::*;
    case("255", vec![Number(255), Eof]);
    case(
        "256",
        vec![Error(LexError::NumberOutOfRange(format!("256"))), Eof],
    );
}

#[test]
fn hex_literal() {
    use TokenKind::*;
    case("0x10+0XfF", vec![Number(16), Plus, Number(255), Eof]);
    case(
        "0x100",
        vec![Error(LexError::NumberOutOfRange(format!("0x100"))), Eof],
    );
    // no hex digit after the prefix: a plain zero followed by an identifier
    case("0x", vec![Number(0), Ident(format!("x")), Eof]);
    case("0xg", vec![Number(0), Ident(format!("xg")), Eof]);
}

#[test]
fn return_keyword() {
    use TokenKind::*;
    case(
        "return a; returns",
        vec![Return, Ident(format!("a")), Semicolon, Ident(format!("returns")), Eof],
    );
}

#[test]
fn invalid_character() {
    use TokenKind::*;
    case(
        "1 $ 2",
        vec![Number(1), Error(LexError::InvalidChar('$')), Number(2), Eof],
    );
    case("!", vec![Error(LexError::InvalidChar('!')), Eof]);
}

#[test]
fn positions() {
    let tokens: Vec<_> = Lexer::new("a\n  + b").collect();
    let pos: Vec<_> = tokens.iter().map(|t| t.pos).collect();
    assert_eq!(
        pos,
        vec![
            Pos { line: 1, col: 1 },
            Pos { line: 2, col: 3 },
            Pos { line: 2, col: 5 },
            Pos { line: 2, col: 6 },
        ]
    );
}

#[test]
fn lazy_and_finite() {
    let mut lexer = Lexer::new("1");
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Number(1)));
    assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}
