//! Lexing and parse errors.

mod error;
pub mod lexer;

pub use error::{ParseError, ParseErrorKind, Span};
pub use lexer::{Kind, Lexer, Token, tokenize};
