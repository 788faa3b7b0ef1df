//! Constant folding.
//!
//! The optimizer replays a program against a symbolic context. Opcodes whose
//! result depends only on literals are folded away; their values stay on
//! the symbolic stack, pending, until an opcode that touches a register needs
//! them. At that point the pending literals are emitted as `Number` opcodes,
//! followed by the register-touching opcode itself.
//!
//! Everything below the *materialization boundary* is already represented
//! in the output. Everything above it is a pending literal.

use smallvec::SmallVec;

use super::context::{Context, Stack, StackElement};
use super::error::RuntimeError;
use super::opcode::Opcode;

/// A context that never stores register values.
///
/// Any register read or write marks the next pushed element as unknown.
#[derive(Debug, Default)]
pub struct OptimizationContext {
    stack: Stack,
    touched: bool,
}

impl OptimizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending_literals(&self, boundary: usize) -> SmallVec<[f64; 8]> {
        self.stack
            .get(boundary..)
            .unwrap_or_default()
            .iter()
            .filter_map(StackElement::as_literal)
            .collect()
    }
}

impl Context for OptimizationContext {
    fn push_stack(&mut self, element: StackElement) {
        if self.touched {
            self.touched = false;
            self.stack.push(StackElement::unknown());
        } else {
            self.stack.push(element);
        }
    }

    fn pop_stack(&mut self) -> Result<StackElement, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    fn peek_stack(&self) -> Option<&StackElement> {
        self.stack.last()
    }

    fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    fn clear_stack(&mut self) {
        self.stack.clear();
        self.touched = false;
    }

    fn load_register(&mut self, _name: &str) -> f64 {
        self.touched = true;
        0.0
    }

    fn store_register(&mut self, _name: &str, _value: f64) {
        self.touched = true;
    }
}

/// Folds constant sub-computations out of an opcode sequence.
#[derive(Debug, Default)]
pub struct Optimizer {
    ctx: OptimizationContext,
    output: Vec<Opcode>,
    boundary: usize,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the folded sequence, or `None` if it is no shorter than
    /// `opcodes`.
    pub fn optimize(mut self, opcodes: &[Opcode]) -> Result<Option<Vec<Opcode>>, RuntimeError> {
        for opcode in opcodes {
            let pending = match self.ctx.peek_stack() {
                Some(top) if top.is_literal() => self.ctx.pending_literals(self.boundary),
                _ => SmallVec::new(),
            };

            opcode.execute(&mut self.ctx)?;

            match self.ctx.peek_stack() {
                Some(top) if top.is_literal() => {}
                _ => {
                    self.output
                        .extend(pending.into_iter().map(Opcode::Number));
                    self.output.push(opcode.clone());
                    self.boundary = self.ctx.stack_depth();
                }
            }
        }

        if let Some(value) = self.ctx.peek_stack().and_then(StackElement::as_literal) {
            if self.output.is_empty() {
                tracing::debug!(value, "Program folded to a constant");
                return Ok(Some(vec![Opcode::Number(value)]));
            }
            // Keep whatever was already emitted; its register effects matter.
            let pending = self.ctx.pending_literals(self.boundary);
            self.output.extend(pending.into_iter().map(Opcode::Number));
        }

        if self.output.len() < opcodes.len() {
            Ok(Some(self.output))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "optimizer_test.rs"]
mod optimizer_test;
