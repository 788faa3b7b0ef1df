mod context;
mod error;
mod opcode;
mod optimizer;
mod program;

pub use context::{Context, ExecutionContext, StackElement};
pub use error::RuntimeError;
pub use opcode::{Opcode, OpcodeValue};
pub use optimizer::{OptimizationContext, Optimizer};
pub use program::Program;
