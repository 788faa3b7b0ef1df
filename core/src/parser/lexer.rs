//! Tokenizer for arithmetic expressions.
//!
//! Symbols are matched longest first (so `**` is never split into two `*`),
//! numbers and identifiers by maximal munch. Only the space character is
//! skipped; anything else that is not part of a token is an error.

use core::fmt;
use core::iter::FusedIterator;

use logos::Logos;

use super::error::{ParseError, ParseErrorKind, Span};

/// Token and opcode kind.
///
/// Tokens and opcodes share one closed set of kinds: every token kind the
/// lexer produces has a matching opcode kind.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r" +")]
pub enum Kind {
    #[regex(r"(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[token("+")]
    Add,

    #[token("-")]
    Subtract,

    #[token("*")]
    Multiply,

    #[token("/")]
    Divide,

    #[token("**")]
    Power,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[token("=")]
    Assign,

    #[token("(")]
    OpenBracket,

    #[token(")")]
    CloseBracket,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Number => "Number",
            Kind::Add => "Add",
            Kind::Subtract => "Subtract",
            Kind::Multiply => "Multiply",
            Kind::Divide => "Divide",
            Kind::Power => "Power",
            Kind::Identifier => "Identifier",
            Kind::Assign => "Assign",
            Kind::OpenBracket => "OpenBracket",
            Kind::CloseBracket => "CloseBracket",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token, borrowing its text from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: Kind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    /// The raw text for pattern tokens (numbers and identifiers), `None` for
    /// symbols.
    pub fn raw_value(&self) -> Option<&'src str> {
        match self.kind {
            Kind::Number | Kind::Identifier => Some(self.text),
            _ => None,
        }
    }
}

/// Lazy token stream over a source string.
///
/// Yields at most one error, after which the stream is exhausted.
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, Kind>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            inner: Kind::lexer(source),
            failed: false,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.inner.next()?;
        let span = self.inner.span();
        match result {
            Ok(kind) => Some(Ok(Token {
                kind,
                text: self.inner.slice(),
                span: Span(span),
            })),
            Err(()) => {
                self.failed = true;
                let ch = self.source[span.start..].chars().next().unwrap_or('\0');
                tracing::debug!(offset = span.start, ?ch, "Unrecognized character");
                Some(Err(ParseError::new(
                    ParseErrorKind::UnrecognizedCharacter(ch),
                    self.source,
                    span.start,
                )))
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes `source` lazily.
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod lexer_test;
