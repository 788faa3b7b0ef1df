//! The Tally compilation engine.

use super::{Calculator, CompileOptionsOverride, EngineOptions, Error};
use crate::vm::{ExecutionContext, Program};

/// Compiles and runs expressions with shared options and default registers.
///
/// # Example
///
/// ```
/// use tally_core::api::{Engine, EngineOptions};
///
/// let engine = Engine::new(EngineOptions::default(), |defaults| {
///     defaults.set_register("pi", std::f64::consts::PI);
/// });
///
/// let program = engine.compile(Default::default(), "r = pi * 2").unwrap();
///
/// let mut ctx = engine.new_context();
/// let result = engine.run(&program, &mut ctx).unwrap();
/// assert!((result - 6.28318).abs() < 0.0001);
/// assert_eq!(ctx.register("r"), Some(result));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    defaults: ExecutionContext,
    options: EngineOptions,
}

impl Engine {
    /// Creates an engine. `init` seeds the registers every new context
    /// starts with.
    pub fn new(options: EngineOptions, init: impl FnOnce(&mut ExecutionContext)) -> Self {
        let mut defaults = ExecutionContext::new();
        init(&mut defaults);
        Self { defaults, options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The registers every new context starts with.
    pub fn defaults(&self) -> &ExecutionContext {
        &self.defaults
    }

    /// A fresh context holding a copy of the default registers.
    pub fn new_context(&self) -> ExecutionContext {
        let mut ctx = ExecutionContext::new();
        self.defaults.merge_into(&mut ctx);
        ctx
    }

    /// Compiles `source`, optimizing it if the merged options ask for it.
    pub fn compile(
        &self,
        options_override: CompileOptionsOverride,
        source: &str,
    ) -> Result<Program, Error> {
        let mut options = self.options.default_compile_options.clone();
        options.override_with(&options_override);

        let program = Program::compile_with_max_depth(source, options.max_depth)?;
        if options.optimize {
            return Ok(program.optimize()?);
        }
        Ok(program)
    }

    pub fn run(&self, program: &Program, ctx: &mut ExecutionContext) -> Result<f64, Error> {
        Ok(program.execute_with(ctx)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(EngineOptions::default(), |_| {})
    }
}

impl Calculator for Engine {
    type Context = ExecutionContext;

    fn new_context(&self) -> ExecutionContext {
        Engine::new_context(self)
    }

    fn new_program(&self, source: &str) -> Result<Program, Error> {
        self.compile(CompileOptionsOverride::default(), source)
    }

    fn execute(&self, program: &Program, ctx: &mut ExecutionContext) -> Result<f64, Error> {
        self.run(program, ctx)
    }
}
