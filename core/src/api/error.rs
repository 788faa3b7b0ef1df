//! Public error types for the Tally API.
//!
//! Internal errors convert into [`Error`] at API boundaries; parse errors
//! additionally convert into [`Diagnostic`]s for rendering.

use core::fmt;

use thiserror::Error;

use crate::parser::{ParseError, Span};
use crate::vm::RuntimeError;

/// Public error type for all Tally operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The source text could not be compiled.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Execution (or optimization) of a program failed.
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// The diagnostic for errors that point into source text.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Parse(err) => Some(err.to_diagnostic()),
            Error::Runtime(_) => None,
        }
    }

    /// The source text the error refers to, if any.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Parse(err) => Some(&err.input),
            Error::Runtime(_) => None,
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Help messages suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}
