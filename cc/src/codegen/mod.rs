pub mod reg;
pub mod stack;

use crate::error::Error;
use crate::grammer::ast::{BinaryOp, Expr, Program, Stmt};
use arch::field::IMM8;
use arch::{Instruction, Target};
use indexmap::IndexMap;
use itertools::chain;
use log::debug;
use std::fmt;

/// Instruction sequences of one target family. Every sequence leaves the
/// operand stack one value deeper (or unchanged, for `store`).
pub trait Backend {
    /// Push an integer literal.
    fn number(&self, n: u16) -> Vec<Instruction>;
    /// Push the value of variable slot `slot`.
    fn load(&self, slot: u16) -> Vec<Instruction>;
    /// Write the top of stack to `slot`, leaving it on the stack.
    fn store(&self, slot: u16) -> Vec<Instruction>;
    /// Pop two operands, push the result.
    fn binary(&self, op: BinaryOp) -> Vec<Instruction>;
    /// Pop and forget the top of stack.
    fn discard(&self) -> Vec<Instruction>;
    /// Continue at `label`, leaving the stack as it is.
    fn jump(&self, label: &str) -> Vec<Instruction>;
}

/// Label placed after the last statement when the program returns early.
pub const EPILOGUE: &str = "_end";

/// One line of generated assembly.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Label(String),
    Inst(Instruction),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Label(name) => write!(f, "{name}:"),
            Item::Inst(inst) => write!(f, "{inst}"),
        }
    }
}

pub fn backend(target: Target) -> Box<dyn Backend> {
    match target {
        Target::Reg => Box::new(reg::RegBackend),
        Target::Stack => Box::new(stack::StackBackend),
    }
}

/// Variable slots are addressed through an 8-bit immediate.
pub const MAX_VARIABLES: usize = IMM8.max() as usize + 1;

pub struct Codegen {
    backend: Box<dyn Backend>,
    vars: IndexMap<String, u16>,
}

impl Codegen {
    pub fn new(target: Target) -> Self {
        Self {
            backend: backend(target),
            vars: IndexMap::new(),
        }
    }

    /// Variable name to slot, in allocation order.
    pub fn variables(&self) -> &IndexMap<String, u16> {
        &self.vars
    }

    /// Lower a program. Only the value of the last statement executed stays
    /// on the stack: the final one, or the first `return` reached.
    pub fn program(&mut self, program: &Program) -> Result<Vec<Item>, Error> {
        let mut insts = Vec::new();
        let mut returns = false;
        for (idx, stmt) in program.0.iter().enumerate() {
            if idx > 0 {
                insts.extend(self.backend.discard());
            }
            match stmt {
                Stmt::Expr(expr) => insts.extend(self.expr(expr)?),
                Stmt::Return(expr) => {
                    returns = true;
                    insts.extend(chain!(self.expr(expr)?, self.backend.jump(EPILOGUE)));
                }
            }
        }

        let mut items: Vec<Item> = insts.into_iter().map(Item::Inst).collect();
        if returns {
            items.push(Item::Label(EPILOGUE.to_string()));
        }
        Ok(items)
    }

    fn expr(&mut self, expr: &Expr) -> Result<Vec<Instruction>, Error> {
        let insts = match expr {
            Expr::Number(n) => self.backend.number(*n),
            Expr::Ident(name) => {
                let slot = self.slot(name)?;
                self.backend.load(slot)
            }
            Expr::Assign(name, rhs) => {
                let slot = self.slot(name)?;
                let rhs = self.expr(rhs)?;
                chain!(rhs, self.backend.store(slot)).collect()
            }
            Expr::Unary(op, operand) => {
                let operand = self.expr(operand)?;
                chain!(
                    self.backend.number(0),
                    operand,
                    self.backend.binary(op.as_binary())
                )
                .collect()
            }
            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.expr(lhs)?;
                let rhs = self.expr(rhs)?;
                chain!(lhs, rhs, self.backend.binary(*op)).collect()
            }
        };
        Ok(insts)
    }

    /// Slot of `name`, allocating the next one on first sight.
    fn slot(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(&slot) = self.vars.get(name) {
            return Ok(slot);
        }
        let slot = self.vars.len();
        if slot >= MAX_VARIABLES {
            return Err(Error::TooManyVariables(
                name.to_string(),
                slot,
                MAX_VARIABLES,
            ));
        }
        debug!("variable `{}` -> slot {}", name, slot);
        self.vars.insert(name.to_string(), slot as u16);
        Ok(slot as u16)
    }
}
