//! Implicit conversions between the MiniC types
//!
//! The lattice is `bool < int < float`.  Widening along the lattice is
//! always legal.  Narrowing never is, with one asymmetric carve-out: in a
//! *conditional context* (an `if`/`while` condition or an operand of
//! `!`/`&&`/`||`), `int` and `float` convert down to `bool` by comparing
//! against zero.  Everywhere else that conversion is rejected too.
//!
//! [`implicit_conversion`] answers "how do I get from `from` to `to` here",
//! [`promote`] answers "what common type do these two operands meet at".
//! Neither emits IR; the driver turns the returned [`Conversion`] into cast
//! or compare instructions.

use crate::diagnostics::CompileError;
use crate::parser::ast::{SourceLocation, Type};

/// Whether an expression's value feeds a truthiness test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionContext {
    /// Ordinary value position: assignment, argument, return, arithmetic
    Value,
    /// `if`/`while` condition or logical operand
    Condition,
}

/// The instruction-shaped recipe for one implicit conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Types already match
    None,
    /// bool -> int: `zext i1 to i32`
    BoolToInt,
    /// bool -> float: `zext i1 to i32` then `sitofp i32 to float`
    BoolToFloat,
    /// int -> float: `sitofp`
    IntToFloat,
    /// int -> bool: `icmp ne 0` (conditional context only)
    IntToBool,
    /// float -> bool: `fcmp one 0.0` (conditional context only)
    FloatToBool,
}

/// Rank in the widening lattice; `void` has none.
fn rank(ty: Type) -> Option<u8> {
    match ty {
        Type::Bool => Some(0),
        Type::Int => Some(1),
        Type::Float => Some(2),
        Type::Void => None,
    }
}

/// Find the conversion taking `from` to `to`, or reject it.
pub fn implicit_conversion(
    from: Type,
    to: Type,
    context: ConversionContext,
    loc: SourceLocation,
) -> Result<Conversion, CompileError> {
    if from == to {
        return Ok(Conversion::None);
    }

    let conv = match (from, to) {
        (Type::Bool, Type::Int) => Some(Conversion::BoolToInt),
        (Type::Bool, Type::Float) => Some(Conversion::BoolToFloat),
        (Type::Int, Type::Float) => Some(Conversion::IntToFloat),
        (Type::Int, Type::Bool) if context == ConversionContext::Condition => {
            Some(Conversion::IntToBool)
        }
        (Type::Float, Type::Bool) if context == ConversionContext::Condition => {
            Some(Conversion::FloatToBool)
        }
        _ => None,
    };

    match conv {
        Some(c) => Ok(c),
        None => {
            let message = if to == Type::Bool && context == ConversionContext::Value {
                format!(
                    "cannot implicitly convert '{}' to '{}' outside a condition",
                    from, to
                )
            } else {
                format!("cannot implicitly convert '{}' to '{}'", from, to)
            };
            Err(CompileError::new(message, loc))
        }
    }
}

/// Common type two binary operands widen to.
///
/// Two `bool`s stay `bool` (the operation runs on the 1-bit values); any
/// mix involving `int` or `float` promotes both sides to the wider of the
/// two. `void` operands have no rank and are rejected.
pub fn promote(lhs: Type, rhs: Type, loc: SourceLocation) -> Result<Type, CompileError> {
    let lr = rank(lhs);
    let rr = rank(rhs);
    match (lr, rr) {
        (Some(a), Some(b)) => Ok(if a >= b { lhs } else { rhs }),
        _ => {
            let bad = if lr.is_none() { lhs } else { rhs };
            Err(CompileError::new(
                format!("invalid operand of type '{}'", bad),
                loc,
            ))
        }
    }
}
