//! Precedence-climbing compiler.
//!
//! Each precedence level compiles its operands with the next-higher level
//! and folds its own operators to the left, so `a op b op c` compiles as
//! `(a op b) op c` at every level, `**` included. Opcodes are emitted
//! directly in evaluation order: left operand, right operand, operator.

use crate::parser::{Kind, Lexer, ParseError, ParseErrorKind, Token, tokenize};
use crate::vm::{Opcode, Program};

/// Default maximum bracket nesting depth.
///
/// Keeps the recursive descent well clear of the thread's stack limit.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Binary operators by precedence, lowest first.
const LEVELS: [&[Kind]; 4] = [
    &[Kind::Assign],
    &[Kind::Add, Kind::Subtract],
    &[Kind::Multiply, Kind::Divide],
    &[Kind::Power],
];

/// Compiles one source string into a [`Program`].
pub struct Compiler<'src> {
    source: &'src str,
    tokens: Lexer<'src>,
    lookahead: Option<Token<'src>>,
    opcodes: Vec<Opcode>,
    depth: usize,
    max_depth: usize,
}

impl<'src> Compiler<'src> {
    pub fn new(source: &'src str, max_depth: usize) -> Self {
        Compiler {
            source,
            tokens: tokenize(source),
            lookahead: None,
            opcodes: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Compiles the whole source. There is no partial result: any error
    /// aborts compilation.
    pub fn compile(mut self) -> Result<Program, ParseError> {
        self.parse_level(0)?;
        if let Some(token) = self.advance()? {
            return Err(self.unexpected(&token));
        }
        tracing::debug!(
            source = self.source,
            opcodes = self.opcodes.len(),
            "Compiled expression"
        );
        Ok(Program::from_opcodes(self.opcodes))
    }

    fn peek_kind(&mut self) -> Result<Option<Kind>, ParseError> {
        if self.lookahead.is_none() {
            self.lookahead = self.tokens.next().transpose()?;
        }
        Ok(self.lookahead.as_ref().map(|token| token.kind))
    }

    fn advance(&mut self) -> Result<Option<Token<'src>>, ParseError> {
        match self.lookahead.take() {
            Some(token) => Ok(Some(token)),
            None => self.tokens.next().transpose(),
        }
    }

    fn parse_level(&mut self, level: usize) -> Result<(), ParseError> {
        let Some(operators) = LEVELS.get(level) else {
            return self.parse_primary();
        };

        self.parse_level(level + 1)?;
        while let Some(kind) = self.peek_kind()? {
            if !operators.contains(&kind) {
                break;
            }
            let Some(operator) = self.advance()? else {
                break;
            };
            self.parse_level(level + 1)?;
            self.emit(&operator, operator.text)?;
        }
        Ok(())
    }

    fn parse_primary(&mut self) -> Result<(), ParseError> {
        let Some(token) = self.advance()? else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd, self.source.len()));
        };

        match token.kind {
            Kind::Number | Kind::Identifier => self.emit(&token, token.text),
            Kind::Subtract => match self.advance()? {
                // `-` binds to the literal itself: `-3**2` is `(-3)**2`.
                Some(number) if number.kind == Kind::Number => {
                    let negated = format!("-{}", number.text);
                    self.emit(&number, &negated)
                }
                Some(other) => Err(self.error(
                    ParseErrorKind::ExpectedNumberAfterMinus,
                    other.span.start(),
                )),
                None => Err(self.error(ParseErrorKind::UnexpectedEnd, self.source.len())),
            },
            Kind::OpenBracket => {
                if self.depth >= self.max_depth {
                    return Err(self.error(
                        ParseErrorKind::NestingTooDeep(self.max_depth),
                        token.span.start(),
                    ));
                }
                self.depth += 1;
                self.parse_level(0)?;
                self.depth -= 1;

                match self.advance()? {
                    Some(close) if close.kind == Kind::CloseBracket => Ok(()),
                    Some(other) => Err(self.error(
                        ParseErrorKind::MissingClosingBracket,
                        other.span.start(),
                    )),
                    None => Err(self.error(
                        ParseErrorKind::MissingClosingBracket,
                        self.source.len(),
                    )),
                }
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    fn emit(&mut self, token: &Token<'src>, raw: &str) -> Result<(), ParseError> {
        let opcode = Opcode::from_raw(token.kind, raw).ok_or_else(|| {
            self.error(
                ParseErrorKind::InvalidNumber(raw.to_string()),
                token.span.start(),
            )
        })?;
        self.opcodes.push(opcode);
        Ok(())
    }

    fn unexpected(&self, token: &Token<'src>) -> ParseError {
        self.error(
            ParseErrorKind::UnexpectedToken(token.text.to_string()),
            token.span.start(),
        )
    }

    fn error(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, self.source, offset)
    }
}

/// Compiles `source` with [`DEFAULT_MAX_DEPTH`].
pub fn compile(source: &str) -> Result<Program, ParseError> {
    Compiler::new(source, DEFAULT_MAX_DEPTH).compile()
}

#[cfg(test)]
#[path = "precedence_test.rs"]
mod precedence_test;
