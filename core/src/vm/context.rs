//! Evaluation contexts: a register store plus an evaluation stack.
//!
//! Opcode rules run against any [`Context`]. [`ExecutionContext`] stores real
//! register values; the optimizer supplies a symbolic context of its own.

use ecow::EcoString;
use hashbrown::HashMap;
use smallvec::SmallVec;

use super::error::RuntimeError;

/// A value on the evaluation stack.
///
/// A `Variable` carries only the register name. It is resolved against the
/// context whose stack it sits in (or was just popped from), so an element
/// always reads and writes the registers of the context it was pushed into.
#[derive(Debug, Clone, PartialEq)]
pub enum StackElement {
    Literal(f64),
    Variable(EcoString),
}

impl StackElement {
    /// Placeholder the optimizer pushes for results it cannot precompute.
    ///
    /// The empty name can never come out of the lexer.
    pub(crate) fn unknown() -> Self {
        StackElement::Variable(EcoString::new())
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, StackElement::Literal(_))
    }

    pub fn as_literal(&self) -> Option<f64> {
        match self {
            StackElement::Literal(value) => Some(*value),
            StackElement::Variable(_) => None,
        }
    }

    /// Numeric value of this element, reading registers through `ctx`.
    pub fn value<C: Context + ?Sized>(&self, ctx: &mut C) -> f64 {
        match self {
            StackElement::Literal(value) => *value,
            StackElement::Variable(name) => ctx.load_register(name),
        }
    }

    /// Writes `value` to the register this element refers to.
    pub fn assign<C: Context + ?Sized>(&self, ctx: &mut C, value: f64) -> Result<(), RuntimeError> {
        match self {
            StackElement::Literal(literal) => Err(RuntimeError::AssignToLiteral(*literal)),
            StackElement::Variable(name) => {
                ctx.store_register(name, value);
                Ok(())
            }
        }
    }
}

/// Capabilities an opcode rule needs from the context it runs against.
pub trait Context {
    fn push_stack(&mut self, element: StackElement);

    fn pop_stack(&mut self) -> Result<StackElement, RuntimeError>;

    /// The most recently pushed element.
    fn peek_stack(&self) -> Option<&StackElement>;

    fn stack_depth(&self) -> usize;

    fn clear_stack(&mut self);

    /// Reads a register. Unset registers read as `0`.
    fn load_register(&mut self, name: &str) -> f64;

    fn store_register(&mut self, name: &str, value: f64);
}

pub(crate) type Stack = SmallVec<[StackElement; 16]>;

/// A real register store and evaluation stack.
///
/// One context may serve many `execute` calls in sequence; registers written
/// by one call are visible to the next.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    stack: Stack,
    registers: HashMap<EcoString, f64>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a register, or `None` if it was never set.
    pub fn register(&self, name: &str) -> Option<f64> {
        self.registers.get(name).copied()
    }

    pub fn set_register(&mut self, name: impl Into<EcoString>, value: f64) {
        self.registers.insert(name.into(), value);
    }

    pub fn set_registers<I, K>(&mut self, registers: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<EcoString>,
    {
        self.registers
            .extend(registers.into_iter().map(|(name, value)| (name.into(), value)));
    }

    pub fn clear_registers(&mut self) {
        self.registers.clear();
    }

    /// Copies every register of `self` into `other`, overwriting registers
    /// that `other` already has.
    pub fn merge_into(&self, other: &mut ExecutionContext) {
        other.set_registers(
            self.registers
                .iter()
                .map(|(name, value)| (name.clone(), *value)),
        );
    }

    /// All registers, in no particular order.
    pub fn registers(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.registers
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn num_registers(&self) -> usize {
        self.registers.len()
    }
}

impl Context for ExecutionContext {
    fn push_stack(&mut self, element: StackElement) {
        self.stack.push(element);
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
    }

    fn load_register(&mut self, name: &str) -> f64 {
        self.register(name).unwrap_or(0.0)
    }

    fn store_register(&mut self, name: &str, value: f64) {
        self.set_register(name, value);
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
