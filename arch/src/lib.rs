pub mod error;
pub mod field;
pub mod inst;
pub mod op;
pub mod reg;
pub mod target;

pub use error::EncodeError;
pub use field::Field;
pub use inst::{Instruction, Operand};
pub use op::{Op, RegOp, StackOp};
pub use reg::Reg;
pub use target::Target;
