use thiserror::Error;

use crate::parser::Kind;

/// Failure while executing (or symbolically replaying) a program.
///
/// Registers written before the failure keep their new values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("stack underflow: no value left to pop")]
    StackUnderflow,

    #[error("cannot assign to literal value {0}")]
    AssignToLiteral(f64),

    #[error("`{0}` opcode has no execution rule")]
    NoExecutionRule(Kind),
}
