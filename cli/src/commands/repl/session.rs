//! Line handling for the REPL, independent of the terminal.

use std::fmt::Write;

use tally::{
    CompileOptionsOverride, Engine, ExecutionContext, ParseError, ParseErrorKind, Program,
};

use crate::common::CliResult;

/// Meta-commands understood by the REPL, with their descriptions.
pub const COMMANDS: &[(&str, &str)] = &[
    (":registers", "list the registers and their values"),
    (":clear", "remove every register"),
    (":dump <expr>", "print the opcodes an expression compiles to"),
    (":help", "show this message"),
];

/// The state carried from one REPL line to the next.
pub struct Session {
    engine: Engine,
    ctx: ExecutionContext,
    optimize: bool,
}

impl Session {
    pub fn new(optimize: bool) -> Self {
        let engine = Engine::default();
        let ctx = engine.new_context();
        Self {
            engine,
            ctx,
            optimize,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Handles one submitted buffer and returns the text to print.
    ///
    /// Expressions run against the session's registers, so assignments made
    /// on one line are visible on the next.
    pub fn handle(&mut self, input: &str) -> CliResult<String> {
        let line = flatten(input);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        if let Some(command) = trimmed.strip_prefix(':') {
            let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
            return self.meta_command(name, arg.trim());
        }

        let program = self.compile(&line)?;
        let value = self.engine.run(&program, &mut self.ctx)?;
        Ok(format!("{value}\n"))
    }

    fn compile(&self, source: &str) -> CliResult<Program> {
        let options = CompileOptionsOverride {
            optimize: Some(self.optimize),
            ..Default::default()
        };
        self.engine.compile(options, source)
    }

    fn meta_command(&mut self, name: &str, arg: &str) -> CliResult<String> {
        match name {
            "registers" => Ok(self.list_registers()),
            "clear" => {
                self.ctx.clear_registers();
                Ok("Registers cleared\n".to_string())
            }
            "dump" => Ok(self.compile(arg)?.to_string()),
            "help" => {
                let mut out = String::new();
                for (command, description) in COMMANDS {
                    let _ = writeln!(out, "  {command:<14} {description}");
                }
                Ok(out)
            }
            _ => Ok(format!(
                "Unknown command `:{name}`. Type :help for a list of commands\n"
            )),
        }
    }

    fn list_registers(&self) -> String {
        let mut registers: Vec<_> = self.ctx.registers().collect();
        if registers.is_empty() {
            return "No registers set\n".to_string();
        }
        registers.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::new();
        for (name, value) in registers {
            let _ = writeln!(out, "{name} = {value}");
        }
        out
    }
}

/// Replaces line breaks with spaces so multi-line entries compile.
///
/// Byte offsets are preserved, so error positions still line up with the
/// text the user typed.
pub fn flatten(input: &str) -> String {
    input.replace(['\n', '\r'], " ")
}

/// Whether compiling `input` failed only because the input stopped early.
pub fn is_incomplete(err: &ParseError, input: &str) -> bool {
    matches!(
        err.kind,
        ParseErrorKind::UnexpectedEnd | ParseErrorKind::MissingClosingBracket
    ) && err.offset >= input.len()
}
