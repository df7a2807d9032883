use crate::field::{Field, ADDR12, IMM8, MID8, N1, N2, N3};
use crate::target::Target;
use std::fmt;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Register family mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RegOp {
    Mov,
    Add,
    Sub,
    Lt,
    Mul,
    Call,
    Push,
    Lds,
    Pop,
    Sts,
    Ret,
    Mvi,
    Jmp,
    Jz,
    Jnz,
    Halt,
}

/// Stack family mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StackOp {
    Ld,
    Add,
    Sub,
    Mul,
    Lt,
    Gt,
    Eq,
    Load,
    Store,
    Drop,
    Jmp,
    Jz,
    Call,
    Ret,
    Halt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Reg(RegOp),
    Stack(StackOp),
}

// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArgKind {
    #[strum(serialize = "register")]
    Reg,
    #[strum(serialize = "immediate")]
    Imm,
    #[strum(serialize = "address")]
    Addr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg {
    pub kind: ArgKind,
    pub field: Field,
}

impl Arg {
    const fn reg(field: Field) -> Self {
        Arg { kind: ArgKind::Reg, field }
    }
    const fn imm(field: Field) -> Self {
        Arg { kind: ArgKind::Imm, field }
    }
    const fn addr(field: Field) -> Self {
        Arg { kind: ArgKind::Addr, field }
    }
}

/// Encoding template: the fixed bits of the word plus where each operand goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub base: u16,
    pub args: &'static [Arg],
}

impl Format {
    const fn new(base: u16, args: &'static [Arg]) -> Self {
        Format { base, args }
    }

    /// Bits that must equal `base` for a word to be this instruction.
    pub fn opcode_mask(&self) -> u16 {
        !self.args.iter().fold(0, |acc, arg| acc | arg.field.mask())
    }
}

const NONE: &[Arg] = &[];
const RR: &[Arg] = &[Arg::reg(N2), Arg::reg(N3)];
const RS: &[Arg] = &[Arg::reg(N3)];
const RD: &[Arg] = &[Arg::reg(N2)];
const RI: &[Arg] = &[Arg::reg(N1), Arg::imm(IMM8)];
const IMM: &[Arg] = &[Arg::imm(IMM8)];
const ADDR8: &[Arg] = &[Arg::addr(IMM8)];
const ADDR: &[Arg] = &[Arg::addr(ADDR12)];
const BRANCH: &[Arg] = &[Arg::addr(MID8), Arg::reg(N3)];

impl RegOp {
    pub fn format(&self) -> Format {
        use RegOp::*;
        match self {
            Mov => Format::new(0x0000, RR),
            Add => Format::new(0x0100, RR),
            Sub => Format::new(0x0200, RR),
            Lt => Format::new(0x0300, RR),
            Mul => Format::new(0x0400, RR),
            Call => Format::new(0x0500, ADDR8),
            Push => Format::new(0x0800, RS),
            Lds => Format::new(0x0900, RR),
            Pop => Format::new(0x0A00, RD),
            Sts => Format::new(0x0B00, RR),
            Ret => Format::new(0x0C00, NONE),
            Mvi => Format::new(0x1000, RI),
            Jmp => Format::new(0x2000, ADDR),
            Jz => Format::new(0x4000, BRANCH),
            Jnz => Format::new(0x6000, BRANCH),
            Halt => Format::new(0xFFFF, NONE),
        }
    }
}

/// Stack words are 12 bits wide: opcode in the top nibble, operand below it.
impl StackOp {
    pub fn format(&self) -> Format {
        use StackOp::*;
        match self {
            Ld => Format::new(0x000, IMM),
            Add => Format::new(0x100, NONE),
            Sub => Format::new(0x200, NONE),
            Mul => Format::new(0x300, NONE),
            Lt => Format::new(0x400, NONE),
            Gt => Format::new(0x500, NONE),
            Eq => Format::new(0x600, NONE),
            Load => Format::new(0x700, ADDR8),
            Store => Format::new(0x800, ADDR8),
            Drop => Format::new(0x900, NONE),
            Jmp => Format::new(0xA00, ADDR8),
            Jz => Format::new(0xB00, ADDR8),
            Call => Format::new(0xC00, ADDR8),
            Ret => Format::new(0xD00, NONE),
            Halt => Format::new(0xFFF, NONE),
        }
    }
}

// ----------------------------------------------------------------------------

impl Op {
    /// Look up a mnemonic in the table of `target`. Case-insensitive.
    pub fn parse(s: &str, target: Target) -> Option<Self> {
        match target {
            Target::Reg => s.parse().ok().map(Op::Reg),
            Target::Stack => s.parse().ok().map(Op::Stack),
        }
    }

    pub fn all(target: Target) -> Box<dyn Iterator<Item = Op>> {
        match target {
            Target::Reg => Box::new(RegOp::iter().map(Op::Reg)),
            Target::Stack => Box::new(StackOp::iter().map(Op::Stack)),
        }
    }

    pub fn target(&self) -> Target {
        match self {
            Op::Reg(_) => Target::Reg,
            Op::Stack(_) => Target::Stack,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Op::Reg(op) => op.format(),
            Op::Stack(op) => op.format(),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Reg(op) => write!(f, "{op}"),
            Op::Stack(op) => write!(f, "{op}"),
        }
    }
}
