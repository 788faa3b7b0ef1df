//! Tally - a small arithmetic expression calculator
//!
//! # Overview
//!
//! Tally compiles infix arithmetic over `f64` numbers and named registers
//! into a flat sequence of stack-machine opcodes, optionally folds constant
//! subexpressions, and executes the result against a register context.
//!
//! # Quick Start
//!
//! ```
//! use tally::{Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default(), |defaults| {
//!     defaults.set_register("rate", 0.25);
//! });
//!
//! let program = engine.compile(Default::default(), "tax = 200 * rate").unwrap();
//! let mut ctx = engine.new_context();
//! assert_eq!(engine.run(&program, &mut ctx).unwrap(), 50.0);
//! assert_eq!(ctx.register("tax"), Some(50.0));
//! ```
//!
//! # Optimization
//!
//! ```
//! use tally::Program;
//!
//! let program = Program::compile("a * (2 + 3)").unwrap();
//! let optimized = program.optimize().unwrap();
//! assert_eq!(optimized.to_string(), "Identifier a\nNumber 5\nMultiply\n");
//! ```

pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

// Re-export public API from tally_core
pub use tally_core::api::{
    Calculator, CompileOptions, CompileOptionsOverride, Diagnostic, Engine, EngineOptions, Error,
    Registers, Severity,
};

pub use tally_core::compiler::{DEFAULT_MAX_DEPTH, compile};
pub use tally_core::parser::{ParseError, ParseErrorKind, Span};
pub use tally_core::vm::{
    Context, ExecutionContext, Opcode, OpcodeValue, Program, RuntimeError, StackElement,
};
