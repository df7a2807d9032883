use crate::error::Error;
use arch::{Instruction, Op, Operand, Reg, Target};

// ----------------------------------------------------------------------------
// Line

/// `{ label ":" } [ mnemonic [ operand { "," operand } ] ] [ ";" comment ]`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub labels: Vec<String>,
    pub code: Option<Instruction>,
    pub comment: Option<String>,
}

impl Line {
    pub fn parse(raw: &str, target: Target) -> Result<Line, Error> {
        let (body, comment) = match raw.split_once(';') {
            Some((body, comment)) => (body, Some(comment.trim().to_string())),
            None => (raw, None),
        };

        // main: loop: add r0,r1
        let mut rest = body.trim();
        let mut labels = Vec::new();
        while let Some((head, tail)) = rest.split_once(':') {
            let name = head.trim();
            if !is_ident(name) {
                break;
            }
            labels.push(name.to_string());
            rest = tail.trim();
        }

        let code = match rest {
            "" => None,
            code => Some(parse_code(code, target)?),
        };
        Ok(Line {
            labels,
            code,
            comment,
        })
    }
}

// ----------------------------------------------------------------------------
// Operation

fn parse_code(code: &str, target: Target) -> Result<Instruction, Error> {
    let (mnemonic, args) = code
        .split_once(char::is_whitespace)
        .unwrap_or((code, ""));
    let op = Op::parse(mnemonic, target)
        .ok_or_else(|| Error::InvalidInstruction(mnemonic.to_string()))?;

    let args = args.trim();
    let operands = if args.is_empty() {
        Vec::new()
    } else {
        args.split(',')
            .map(|arg| parse_operand(arg.trim()))
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok(Instruction::new(op, operands))
}

fn parse_operand(arg: &str) -> Result<Operand, Error> {
    if let Some(index) = register_index(arg) {
        return index
            .parse::<u8>()
            .ok()
            .and_then(|idx| Reg::try_from(idx).ok())
            .map(Operand::Reg)
            .ok_or_else(|| Error::RegisterOutOfRange(arg.to_string()));
    }
    match arg.chars().next() {
        Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' => parse_int(arg)
            .map(Operand::Imm)
            .ok_or_else(|| Error::InvalidOperand(arg.to_string())),
        Some(_) if is_ident(arg) => Ok(Operand::Label(arg.to_string())),
        _ => Err(Error::InvalidOperand(arg.to_string())),
    }
}

// r0 .. r7, R0 .. R7
fn register_index(arg: &str) -> Option<&str> {
    let index = arg.strip_prefix(['r', 'R'])?;
    (!index.is_empty() && index.chars().all(|ch| ch.is_ascii_digit())).then_some(index)
}

/// Decimal or `0x` / `0o` / `0b` prefixed, with an optional sign
fn parse_int(s: &str) -> Option<i64> {
    let (neg, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        Some("0o") => (8, &unsigned[2..]),
        Some("0b") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if neg { -value } else { value })
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}
