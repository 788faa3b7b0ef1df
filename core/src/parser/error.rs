//! Parse errors produced by the lexer and the compiler.

use core::ops::Range;

use thiserror::Error;

use crate::api::{Diagnostic, Severity};

/// A byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span(start..end)
    }

    pub fn start(&self) -> usize {
        self.0.start
    }

    pub fn end(&self) -> usize {
        self.0.end
    }
}

/// What went wrong while lexing or compiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unrecognized character {0:?}")]
    UnrecognizedCharacter(char),

    #[error("missing closing bracket")]
    MissingClosingBracket,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("expected a number after `-`")]
    ExpectedNumberAfterMinus,

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("expression nesting depth exceeds maximum of {0} levels")]
    NestingTooDeep(usize),
}

impl ParseErrorKind {
    /// Stable diagnostic code for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnrecognizedCharacter(_) => "P001",
            ParseErrorKind::MissingClosingBracket => "P002",
            ParseErrorKind::UnexpectedEnd => "P003",
            ParseErrorKind::UnexpectedToken(_) => "P004",
            ParseErrorKind::ExpectedNumberAfterMinus => "P005",
            ParseErrorKind::InvalidNumber(_) => "P006",
            ParseErrorKind::NestingTooDeep(_) => "P007",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            ParseErrorKind::UnrecognizedCharacter(_) => Some(
                "Expressions may only contain numbers, names, `+ - * / ** =`, brackets and spaces",
            ),
            ParseErrorKind::MissingClosingBracket => Some("Add a `)` to close the bracket"),
            ParseErrorKind::ExpectedNumberAfterMinus => {
                Some("A leading `-` only applies to number literals, e.g. `-3`")
            }
            _ => None,
        }
    }
}

/// A compilation failure.
///
/// Carries the full source buffer and the byte offset of the offending
/// position so that callers can render the error in context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub input: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, input: &str, offset: usize) -> Self {
        ParseError {
            kind,
            input: input.to_string(),
            offset,
        }
    }

    /// Human readable message, without the offset.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// The source range the error points at.
    ///
    /// Covers the offending character or token when there is one, and is
    /// empty at the end of input.
    pub fn span(&self) -> Span {
        let rest = self.input.get(self.offset..).unwrap_or("");
        let len = match &self.kind {
            ParseErrorKind::UnexpectedToken(text) | ParseErrorKind::InvalidNumber(text) => {
                text.len()
            }
            _ => rest.chars().next().map_or(0, char::len_utf8),
        };
        Span::new(self.offset, self.offset + len)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: self.message(),
            span: self.span(),
            help: self.kind.help().map(str::to_string).into_iter().collect(),
            code: Some(self.kind.code().to_string()),
        }
    }
}
