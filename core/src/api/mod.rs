//! Public API for the Tally expression calculator.
//!
//! # Example
//!
//! ```
//! use tally_core::api::{CompileOptionsOverride, Engine, EngineOptions};
//!
//! let engine = Engine::new(EngineOptions::default(), |defaults| {
//!     defaults.set_register("x", 4.0);
//! });
//!
//! let options = CompileOptionsOverride {
//!     optimize: Some(true),
//!     ..Default::default()
//! };
//! let program = engine.compile(options, "x * (2 + 3)").unwrap();
//! assert_eq!(program.num_opcodes(), 3);
//!
//! let mut ctx = engine.new_context();
//! assert_eq!(engine.run(&program, &mut ctx).unwrap(), 20.0);
//! ```

pub mod calculator;
pub mod engine;
pub mod error;
pub mod options;

pub use calculator::{Calculator, Registers};
pub use engine::Engine;
pub use error::{Diagnostic, Error, Severity};
pub use options::{CompileOptions, CompileOptionsOverride, EngineOptions};
