//! Operator semantics on runtime values.
//!
//! Integer arithmetic wraps on overflow. Mixing Integer and Double
//! computes in Double. Division or remainder by zero is an error for both.

use std::cmp::Ordering;

use talon_ast::BinaryOp;
use talon_core::{RuntimeError, Span};
use talon_registry::{Primitives, Value};

/// The Boolean behind a condition value.
pub(super) fn truthy(value: &Value<'_>, span: Span) -> Result<bool, RuntimeError> {
    match value {
        Value::Null => Err(RuntimeError::NullReference { span }),
        Value::Object(object) => value
            .as_bool()
            .ok_or_else(|| object.payload_mismatch("Boolean").into()),
    }
}

fn non_null(value: &Value<'_>, span: Span) -> Result<(), RuntimeError> {
    if value.is_null() {
        return Err(RuntimeError::NullReference { span });
    }
    Ok(())
}

fn numeric_mismatch(value: &Value<'_>) -> RuntimeError {
    match value.as_object() {
        Some(object) => object.payload_mismatch("Integer or Double").into(),
        None => RuntimeError::NullReference {
            span: Span::default(),
        },
    }
}

/// Apply a non-short-circuit binary operator.
pub(super) fn binary<'ast>(
    prims: &Primitives<'ast>,
    op: BinaryOp,
    left: &Value<'ast>,
    right: &Value<'ast>,
    span: Span,
) -> Result<Value<'ast>, RuntimeError> {
    match op {
        BinaryOp::Equal => Ok(prims.boolean(left.equals(right))),
        BinaryOp::NotEqual => Ok(prims.boolean(!left.equals(right))),
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            let ordering = compare(left, right, span)?;
            let result = match op {
                BinaryOp::Less => ordering == Some(Ordering::Less),
                BinaryOp::LessEqual => {
                    matches!(ordering, Some(Ordering::Less | Ordering::Equal))
                }
                BinaryOp::Greater => ordering == Some(Ordering::Greater),
                _ => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            };
            Ok(prims.boolean(result))
        }
        BinaryOp::LogicalAnd => Ok(prims.boolean(truthy(left, span)? && truthy(right, span)?)),
        BinaryOp::LogicalOr => Ok(prims.boolean(truthy(left, span)? || truthy(right, span)?)),
        BinaryOp::Add if left.as_string().is_some() || right.as_string().is_some() => {
            Ok(prims.string(format!("{left}{right}")))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            arithmetic(prims, op, left, right, span)
        }
    }
}

/// Order two numbers or two strings. `None` when unordered (NaN).
fn compare(left: &Value<'_>, right: &Value<'_>, span: Span) -> Result<Option<Ordering>, RuntimeError> {
    non_null(left, span)?;
    non_null(right, span)?;
    if let (Some(a), Some(b)) = (left.as_string(), right.as_string()) {
        return Ok(Some(a.cmp(&b)));
    }
    if let (Some(a), Some(b)) = (left.as_integer(), right.as_integer()) {
        return Ok(Some(a.cmp(&b)));
    }
    let a = left.as_double().ok_or_else(|| numeric_mismatch(left))?;
    let b = right.as_double().ok_or_else(|| numeric_mismatch(right))?;
    Ok(a.partial_cmp(&b))
}

fn arithmetic<'ast>(
    prims: &Primitives<'ast>,
    op: BinaryOp,
    left: &Value<'ast>,
    right: &Value<'ast>,
    span: Span,
) -> Result<Value<'ast>, RuntimeError> {
    non_null(left, span)?;
    non_null(right, span)?;

    if let (Some(a), Some(b)) = (left.as_integer(), right.as_integer()) {
        let value = match op {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Div | BinaryOp::Mod if b == 0 => {
                return Err(RuntimeError::DivisionByZero { span });
            }
            BinaryOp::Div => a.wrapping_div(b),
            _ => a.wrapping_rem(b),
        };
        return Ok(prims.integer(value));
    }

    let a = left.as_double().ok_or_else(|| numeric_mismatch(left))?;
    let b = right.as_double().ok_or_else(|| numeric_mismatch(right))?;
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => {
            return Err(RuntimeError::DivisionByZero { span });
        }
        BinaryOp::Div => a / b,
        _ => a % b,
    };
    Ok(prims.double(value))
}

/// `-value`.
pub(super) fn negate<'ast>(
    prims: &Primitives<'ast>,
    value: &Value<'ast>,
    span: Span,
) -> Result<Value<'ast>, RuntimeError> {
    non_null(value, span)?;
    if let Some(v) = value.as_integer() {
        return Ok(prims.integer(v.wrapping_neg()));
    }
    let v = value.as_double().ok_or_else(|| numeric_mismatch(value))?;
    Ok(prims.double(-v))
}

/// `value + delta` for the increment and decrement operators.
pub(super) fn step<'ast>(
    prims: &Primitives<'ast>,
    value: &Value<'ast>,
    delta: i64,
    span: Span,
) -> Result<Value<'ast>, RuntimeError> {
    non_null(value, span)?;
    if let Some(v) = value.as_integer() {
        return Ok(prims.integer(v.wrapping_add(delta)));
    }
    let v = value.as_double().ok_or_else(|| numeric_mismatch(value))?;
    Ok(prims.double(v + delta as f64))
}
