use crate::op::ArgKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("`{0}` takes {1} operand(s), got {2}")]
    OperandCount(String, usize, usize),

    #[error("invalid operand: `{1}` for `{0}` must be {2}")]
    InvalidOperand(String, String, ArgKind),

    #[error("immediate out of range: {0} (0..={1})")]
    ImmediateOutOfRange(i64, u16),

    #[error("address out of range: {0} (0..={1})")]
    AddressOutOfRange(i64, u16),
}
