//! Core of the Tally expression calculator.
//!
//! Source text is tokenized by [`parser`], compiled into an opcode sequence
//! by [`compiler`], and executed or constant-folded by [`vm`]. The [`api`]
//! module wraps these into an engine with options and default registers.
//!
//! ```
//! use tally_core::vm::{ExecutionContext, Program};
//!
//! let program = Program::compile("a = 2 + 3 * 4").unwrap();
//! let mut ctx = ExecutionContext::new();
//! assert_eq!(program.execute_with(&mut ctx).unwrap(), 14.0);
//! assert_eq!(ctx.register("a"), Some(14.0));
//! ```

pub mod api;
pub mod compiler;
pub mod parser;
pub mod vm;
