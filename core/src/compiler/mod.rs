//! Compiler from source text to opcode sequences.

mod precedence;

pub use precedence::{Compiler, DEFAULT_MAX_DEPTH, compile};
