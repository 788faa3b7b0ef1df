//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions and argument parsers.
//! All command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use tally_core::parser::{Kind, tokenize};

/// Tally - a small arithmetic expression calculator
#[derive(Parser, Debug)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate an expression
    Eval(EvalArgs),

    /// Start interactive REPL
    Repl(ReplArgs),
}

/// Arguments for the `eval` command.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Expression to evaluate
    pub expression: String,

    /// Set a register before evaluation (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_register)]
    pub registers: Vec<(String, f64)>,

    /// Fold constant subexpressions before running
    #[arg(long)]
    pub optimize: bool,

    /// Print the opcode listing before the result
    #[arg(long)]
    pub dump: bool,
}

/// Arguments for the `repl` command.
#[derive(Args, Debug)]
pub struct ReplArgs {
    /// Fold constant subexpressions before running each line
    #[arg(long)]
    pub optimize: bool,
}

/// Parses a `NAME=VALUE` register assignment.
pub fn parse_register(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{arg}`"))?;
    let name = name.trim();

    let mut tokens = tokenize(name);
    let is_identifier = matches!(tokens.next(), Some(Ok(token)) if token.kind == Kind::Identifier)
        && tokens.next().is_none();
    if !is_identifier {
        return Err(format!("`{name}` is not a valid register name"));
    }

    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for `{name}`: {e}"))?;
    Ok((name.to_string(), value))
}
