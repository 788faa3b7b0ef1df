//! The `eval` command - evaluate an expression.

use tally::{CompileOptionsOverride, Engine, EngineOptions};

use crate::cli::EvalArgs;
use crate::common::CliResult;

/// Run the eval command.
pub fn run(args: EvalArgs) -> CliResult<()> {
    let output = evaluate(&args)?;
    print!("{output}");
    Ok(())
}

/// Evaluates the expression and returns everything the command prints.
pub fn evaluate(args: &EvalArgs) -> CliResult<String> {
    let engine = Engine::new(EngineOptions::default(), |defaults| {
        defaults.set_registers(
            args.registers
                .iter()
                .map(|(name, value)| (name.as_str(), *value)),
        );
    });

    let options = CompileOptionsOverride {
        optimize: Some(args.optimize),
        ..Default::default()
    };
    let program = engine.compile(options, &args.expression)?;
    tracing::debug!(opcodes = program.num_opcodes(), "Compiled expression");

    let mut output = String::new();
    if args.dump {
        output.push_str(&program.to_string());
    }

    let mut ctx = engine.new_context();
    let value = engine.run(&program, &mut ctx)?;
    output.push_str(&format!("{value}\n"));
    Ok(output)
}
