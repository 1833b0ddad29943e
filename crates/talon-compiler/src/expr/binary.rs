//! Binary operator rules.
//!
//! Each binary expression reports at most one error: the first offending
//! operand, left before right.

use talon_ast::{BinaryExpr, BinaryOp};
use talon_core::{CompilationError, DataType, Span};

use crate::checker::MethodChecker;

/// Type of a binary expression.
pub fn check_binary<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    expr: &BinaryExpr<'ast>,
) -> Option<DataType> {
    let left = checker.infer(expr.left);
    let right = checker.infer(expr.right);

    if expr.op.is_equality() {
        return Some(DataType::boolean());
    }
    if expr.op.is_logical() {
        let offending = [&left, &right]
            .into_iter()
            .flatten()
            .find(|ty| !ty.is_boolean());
        if let Some(ty) = offending {
            checker.error(CompilationError::must_be_boolean(ty, expr.span));
        }
        return Some(DataType::boolean());
    }

    let (left, right) = (left?, right?);
    if expr.op.is_relational() {
        if let Err(e) = check_comparable(&left, &right, expr.span) {
            checker.error(e);
        }
        return Some(DataType::boolean());
    }
    arithmetic_result(checker, expr.op, &left, &right, expr.span)
}

/// Result type of `+ - * / %`, reporting an invalid operand pair.
///
/// Shared with compound assignment (`a += b`).
pub(crate) fn arithmetic_result(
    checker: &mut MethodChecker<'_, '_, '_>,
    op: BinaryOp,
    left: &DataType,
    right: &DataType,
    span: Span,
) -> Option<DataType> {
    let result = match op {
        BinaryOp::Add => check_comparable(left, right, span).map(|()| {
            if left.is_string() {
                DataType::string()
            } else {
                numeric_result(left, right)
            }
        }),
        _ => [left, right]
            .into_iter()
            .find(|ty| !ty.is_numeric())
            .map_or(Ok(numeric_result(left, right)), |ty| {
                Err(CompilationError::must_be_numeric(ty, span))
            }),
    };
    match result {
        Ok(ty) => Some(ty),
        Err(e) => {
            checker.error(e);
            None
        }
    }
}

/// Both String or both numeric.
fn check_comparable(left: &DataType, right: &DataType, span: Span) -> Result<(), CompilationError> {
    let addable = |ty: &DataType| ty.is_numeric() || ty.is_string();
    if let Some(ty) = [left, right].into_iter().find(|ty| !addable(ty)) {
        return Err(CompilationError::must_be_addable(ty, span));
    }
    if left.is_string() != right.is_string() {
        return Err(CompilationError::type_mismatch(left, right, span));
    }
    Ok(())
}

/// Integer unless either side is Double.
fn numeric_result(left: &DataType, right: &DataType) -> DataType {
    if left.is_double() || right.is_double() {
        DataType::double()
    } else {
        DataType::integer()
    }
}
