//! Simple and compound assignment.

use talon_ast::AssignExpr;
use talon_core::{CompilationError, DataType};

use super::binary::arithmetic_result;
use crate::checker::MethodChecker;
use crate::conversion::fits_exactly;

/// Type of `target = value` or `target op= value`: the target's type.
pub fn check_assign<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    expr: &AssignExpr<'ast>,
) -> Option<DataType> {
    if !expr.target.is_lvalue() {
        checker.error(CompilationError::not_assignable(expr.target.span()));
        checker.infer(expr.value);
        return None;
    }

    let target = checker.infer(expr.target);
    let Some(op) = expr.op.binary_op() else {
        checker.check_stored(expr.value, target.as_ref());
        return target;
    };

    let value = checker.infer(expr.value);
    let (Some(target), Some(value)) = (target, value) else {
        return None;
    };
    let result = arithmetic_result(checker, op, &target, &value, expr.span)?;
    if !fits_exactly(&result, &target) {
        checker.error(CompilationError::type_mismatch(&result, &target, expr.span));
    }
    Some(target)
}
