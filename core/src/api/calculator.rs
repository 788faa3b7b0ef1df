//! The narrow surface a host application needs.
//!
//! Hosts that should only compile, run and inspect registers can be handed
//! these traits instead of the concrete types. This is encapsulation, not
//! isolation: nothing stops a caller from reaching the concrete types.

use ecow::EcoString;

use super::Error;
use crate::vm::{ExecutionContext, Program};

/// Register access on a context.
pub trait Registers {
    /// Value of a register, or `None` if it was never set.
    fn get_register(&self, name: &str) -> Option<f64>;

    fn set_register(&mut self, name: &str, value: f64);

    fn set_registers<I>(&mut self, registers: I)
    where
        I: IntoIterator<Item = (EcoString, f64)>,
        Self: Sized,
    {
        for (name, value) in registers {
            self.set_register(&name, value);
        }
    }

    fn clear_registers(&mut self);

    /// Copies every register into `other`.
    fn merge_into(&self, other: &mut Self)
    where
        Self: Sized;
}

impl Registers for ExecutionContext {
    fn get_register(&self, name: &str) -> Option<f64> {
        self.register(name)
    }

    fn set_register(&mut self, name: &str, value: f64) {
        ExecutionContext::set_register(self, name, value);
    }

    fn set_registers<I>(&mut self, registers: I)
    where
        I: IntoIterator<Item = (EcoString, f64)>,
        Self: Sized,
    {
        ExecutionContext::set_registers(self, registers);
    }

    fn clear_registers(&mut self) {
        ExecutionContext::clear_registers(self);
    }

    fn merge_into(&self, other: &mut Self) {
        ExecutionContext::merge_into(self, other);
    }
}

/// Creates contexts and programs.
pub trait Calculator {
    type Context: Registers;

    /// A fresh context, seeded with any default registers.
    fn new_context(&self) -> Self::Context;

    fn new_program(&self, source: &str) -> Result<Program, Error>;

    /// Runs `program` against `ctx`.
    fn execute(&self, program: &Program, ctx: &mut Self::Context) -> Result<f64, Error>;
}
