use super::Backend;
use crate::grammer::ast::BinaryOp;
use arch::op::StackOp::*;
use arch::{Instruction, Op, Operand};

pub struct StackBackend;

macro_rules! inst {
    ($op:ident $(, $arg:expr)*) => {
        Instruction::new(Op::Stack($op), vec![$(Operand::from($arg)),*])
    };
}

impl Backend for StackBackend {
    fn number(&self, n: u16) -> Vec<Instruction> {
        vec![inst!(Ld, n)]
    }

    fn load(&self, slot: u16) -> Vec<Instruction> {
        vec![inst!(Load, slot)]
    }

    fn store(&self, slot: u16) -> Vec<Instruction> {
        vec![inst!(Store, slot)]
    }

    fn binary(&self, op: BinaryOp) -> Vec<Instruction> {
        match op {
            BinaryOp::Add => vec![inst!(Add)],
            BinaryOp::Sub => vec![inst!(Sub)],
            BinaryOp::Mul => vec![inst!(Mul)],
            BinaryOp::Lt => vec![inst!(Lt)],
            BinaryOp::Gt => vec![inst!(Gt)],
            BinaryOp::Eq => vec![inst!(Eq)],
            BinaryOp::Ne => vec![inst!(Eq), inst!(Ld, 0u16), inst!(Eq)],
            BinaryOp::Le => vec![inst!(Gt), inst!(Ld, 0u16), inst!(Eq)],
            BinaryOp::Ge => vec![inst!(Lt), inst!(Ld, 0u16), inst!(Eq)],
        }
    }

    fn discard(&self) -> Vec<Instruction> {
        vec![inst!(Drop)]
    }

    fn jump(&self, label: &str) -> Vec<Instruction> {
        vec![inst!(Jmp, Operand::Label(label.to_string()))]
    }
}
