//! Compiled programs.

use core::fmt;
use core::str::FromStr;

use static_assertions::assert_impl_all;

use super::context::{Context, ExecutionContext};
use super::error::RuntimeError;
use super::opcode::Opcode;
use super::optimizer::Optimizer;
use crate::compiler::{self, Compiler};
use crate::parser::ParseError;

/// An immutable, ordered opcode sequence.
///
/// Programs can be executed any number of times against independent
/// contexts.
///
/// # Example
///
/// ```
/// use tally_core::vm::{ExecutionContext, Program};
///
/// let program = Program::compile("a = 2 ** 3").unwrap();
/// let mut ctx = ExecutionContext::new();
/// assert_eq!(program.execute_with(&mut ctx).unwrap(), 8.0);
/// assert_eq!(ctx.register("a"), Some(8.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    opcodes: Vec<Opcode>,
}

assert_impl_all!(Program: Send, Sync);

impl Program {
    /// Compiles `source` with the default nesting limit.
    pub fn compile(source: &str) -> Result<Program, ParseError> {
        compiler::compile(source)
    }

    /// Compiles `source`, failing if brackets nest deeper than `max_depth`.
    pub fn compile_with_max_depth(source: &str, max_depth: usize) -> Result<Program, ParseError> {
        Compiler::new(source, max_depth).compile()
    }

    pub fn from_opcodes(opcodes: Vec<Opcode>) -> Program {
        Program { opcodes }
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn num_opcodes(&self) -> usize {
        self.opcodes.len()
    }

    /// Executes against a fresh context.
    pub fn execute(&self) -> Result<f64, RuntimeError> {
        self.execute_with(&mut ExecutionContext::new())
    }

    /// Executes against `ctx` and returns the final stack value.
    ///
    /// The evaluation stack of `ctx` is cleared first. Registers written
    /// before a failure stay written.
    pub fn execute_with<C: Context + ?Sized>(&self, ctx: &mut C) -> Result<f64, RuntimeError> {
        ctx.clear_stack();
        for opcode in &self.opcodes {
            tracing::trace!(%opcode, depth = ctx.stack_depth(), "Execute");
            if let Err(e) = opcode.execute(ctx) {
                ctx.clear_stack();
                return Err(e);
            }
        }
        let result = ctx.pop_stack()?;
        let value = result.value(ctx);
        ctx.clear_stack();
        Ok(value)
    }

    /// Returns an equivalent program with every register-independent
    /// computation folded into a literal.
    ///
    /// Returns a clone of `self` when folding would not shorten the program.
    pub fn optimize(&self) -> Result<Program, RuntimeError> {
        let optimized = Optimizer::new().optimize(&self.opcodes)?;
        tracing::debug!(
            before = self.num_opcodes(),
            after = optimized.as_ref().map_or(self.num_opcodes(), Vec::len),
            "Optimized program"
        );
        Ok(match optimized {
            Some(opcodes) => Program::from_opcodes(opcodes),
            None => self.clone(),
        })
    }
}

impl From<Vec<Opcode>> for Program {
    fn from(opcodes: Vec<Opcode>) -> Self {
        Program::from_opcodes(opcodes)
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Program::compile(source)
    }
}

/// One opcode per line, `<kind>[ <value>]`.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for opcode in &self.opcodes {
            writeln!(f, "{opcode}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "program_test.rs"]
mod program_test;
