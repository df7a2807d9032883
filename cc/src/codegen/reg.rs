use super::Backend;
use crate::grammer::ast::BinaryOp;
use arch::op::RegOp::*;
use arch::reg::Reg::*;
use arch::{Instruction, Op, Operand};
use itertools::chain;

/// Scratch registers r0, r1 and r2 over a memory-backed operand stack.
pub struct RegBackend;

macro_rules! inst {
    ($op:ident $(, $arg:expr)*) => {
        Instruction::new(Op::Reg($op), vec![$(Operand::from($arg)),*])
    };
}

impl Backend for RegBackend {
    fn number(&self, n: u16) -> Vec<Instruction> {
        vec![inst!(Mvi, R0, n), inst!(Push, R0)]
    }

    fn load(&self, slot: u16) -> Vec<Instruction> {
        vec![inst!(Mvi, R1, slot), inst!(Lds, R0, R1), inst!(Push, R0)]
    }

    fn store(&self, slot: u16) -> Vec<Instruction> {
        vec![
            inst!(Pop, R0),
            inst!(Mvi, R1, slot),
            inst!(Sts, R1, R0),
            inst!(Push, R0),
        ]
    }

    fn binary(&self, op: BinaryOp) -> Vec<Instruction> {
        // lhs in r0, rhs in r1
        let operands = [inst!(Pop, R1), inst!(Pop, R0)];
        let body = match op {
            BinaryOp::Add => vec![inst!(Add, R0, R1), inst!(Push, R0)],
            BinaryOp::Sub => vec![inst!(Sub, R0, R1), inst!(Push, R0)],
            BinaryOp::Mul => vec![inst!(Mul, R0, R1), inst!(Push, R0)],
            BinaryOp::Lt => vec![inst!(Lt, R0, R1), inst!(Push, R0)],
            BinaryOp::Gt => vec![inst!(Lt, R1, R0), inst!(Push, R1)],
            // !(rhs < lhs)
            BinaryOp::Le => vec![
                inst!(Lt, R1, R0),
                inst!(Mvi, R0, 1u16),
                inst!(Sub, R0, R1),
                inst!(Push, R0),
            ],
            // !(lhs < rhs)
            BinaryOp::Ge => vec![
                inst!(Lt, R0, R1),
                inst!(Mvi, R1, 1u16),
                inst!(Sub, R1, R0),
                inst!(Push, R1),
            ],
            BinaryOp::Eq => chain!(
                differs(),
                [inst!(Mvi, R0, 1u16), inst!(Sub, R0, R1), inst!(Push, R0)]
            )
            .collect(),
            BinaryOp::Ne => chain!(differs(), [inst!(Push, R1)]).collect(),
        };
        chain!(operands, body).collect()
    }

    fn discard(&self) -> Vec<Instruction> {
        vec![inst!(Pop, R0)]
    }

    fn jump(&self, label: &str) -> Vec<Instruction> {
        vec![inst!(Jmp, Operand::Label(label.to_string()))]
    }
}

/// r1 = (r0 < r1) + (r1 < r0), which is 1 when r0 != r1 and 0 otherwise.
fn differs() -> Vec<Instruction> {
    vec![
        inst!(Mov, R2, R0),
        inst!(Lt, R2, R1),
        inst!(Lt, R1, R0),
        inst!(Add, R1, R2),
    ]
}
