//! Opcodes and their evaluation rules.

use core::fmt;

use ecow::EcoString;

use super::context::{Context, StackElement};
use super::error::RuntimeError;
use crate::parser::Kind;

/// One compiled instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    Number(f64),
    Identifier(EcoString),
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `L ** R` via [`f64::powf`], so C `pow` edge cases apply:
    /// `1 ** NaN` and `(-1) ** inf` are both `1`.
    Power,
    Assign,
    OpenBracket,
    CloseBracket,
}

/// The payload of an opcode, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpcodeValue<'a> {
    Number(f64),
    Name(&'a str),
}

impl fmt::Display for OpcodeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpcodeValue::Number(value) => write!(f, "{value}"),
            OpcodeValue::Name(name) => f.write_str(name),
        }
    }
}

impl Opcode {
    /// Converts raw token text into an opcode of the given kind.
    ///
    /// Numbers parse their text; identifiers keep it verbatim; every other
    /// kind ignores it. Returns `None` if a number fails to parse.
    pub fn from_raw(kind: Kind, raw: &str) -> Option<Opcode> {
        let opcode = match kind {
            Kind::Number => Opcode::Number(raw.parse().ok()?),
            Kind::Identifier => Opcode::Identifier(raw.into()),
            Kind::Add => Opcode::Add,
            Kind::Subtract => Opcode::Subtract,
            Kind::Multiply => Opcode::Multiply,
            Kind::Divide => Opcode::Divide,
            Kind::Power => Opcode::Power,
            Kind::Assign => Opcode::Assign,
            Kind::OpenBracket => Opcode::OpenBracket,
            Kind::CloseBracket => Opcode::CloseBracket,
        };
        Some(opcode)
    }

    pub fn kind(&self) -> Kind {
        match self {
            Opcode::Number(_) => Kind::Number,
            Opcode::Identifier(_) => Kind::Identifier,
            Opcode::Add => Kind::Add,
            Opcode::Subtract => Kind::Subtract,
            Opcode::Multiply => Kind::Multiply,
            Opcode::Divide => Kind::Divide,
            Opcode::Power => Kind::Power,
            Opcode::Assign => Kind::Assign,
            Opcode::OpenBracket => Kind::OpenBracket,
            Opcode::CloseBracket => Kind::CloseBracket,
        }
    }

    pub fn value(&self) -> Option<OpcodeValue<'_>> {
        match self {
            Opcode::Number(value) => Some(OpcodeValue::Number(*value)),
            Opcode::Identifier(name) => Some(OpcodeValue::Name(name)),
            _ => None,
        }
    }

    /// Runs this opcode's rule against `ctx`.
    ///
    /// Binary operators pop the right operand first, then the left one.
    pub fn execute<C: Context + ?Sized>(&self, ctx: &mut C) -> Result<(), RuntimeError> {
        match self {
            Opcode::Number(value) => ctx.push_stack(StackElement::Literal(*value)),
            Opcode::Identifier(name) => ctx.push_stack(StackElement::Variable(name.clone())),
            Opcode::Add => binary(ctx, |r, l| r + l)?,
            Opcode::Subtract => binary(ctx, |r, l| -r + l)?,
            Opcode::Multiply => binary(ctx, |r, l| r * l)?,
            Opcode::Divide => binary(ctx, |r, l| l / r)?,
            Opcode::Power => binary(ctx, |r, l| l.powf(r))?,
            Opcode::Assign => {
                let value = ctx.pop_stack()?;
                let target = ctx.pop_stack()?;
                if let StackElement::Literal(literal) = target {
                    return Err(RuntimeError::AssignToLiteral(literal));
                }
                let value = value.value(ctx);
                target.assign(ctx, value)?;
                ctx.push_stack(StackElement::Literal(value));
            }
            Opcode::OpenBracket | Opcode::CloseBracket => {
                return Err(RuntimeError::NoExecutionRule(self.kind()));
            }
        }
        Ok(())
    }
}

#[inline(always)]
fn binary<C: Context + ?Sized>(ctx: &mut C, op: fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
    let right = ctx.pop_stack()?;
    let left = ctx.pop_stack()?;
    let right = right.value(ctx);
    let left = left.value(ctx);
    ctx.push_stack(StackElement::Literal(op(right, left)));
    Ok(())
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{} {}", self.kind(), value),
            None => write!(f, "{}", self.kind()),
        }
    }
}

#[cfg(test)]
#[path = "opcode_test.rs"]
mod opcode_test;
