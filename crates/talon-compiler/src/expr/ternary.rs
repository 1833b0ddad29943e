//! Conditional expressions.

use talon_ast::TernaryExpr;
use talon_core::{CompilationError, DataType};

use crate::checker::MethodChecker;
use crate::conversion::is_assignable;

/// Type of `cond ? a : b`: the branch type both branches fit into.
pub fn check_ternary<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    expr: &TernaryExpr<'ast>,
) -> Option<DataType> {
    checker.check_condition(expr.condition);
    let then_ty = checker.infer(expr.then_expr);
    let else_ty = checker.infer(expr.else_expr);
    let (then_ty, else_ty) = (then_ty?, else_ty?);

    let classes = checker.classes();
    if is_assignable(&else_ty, &then_ty, classes) {
        return Some(if then_ty.is_null() { else_ty } else { then_ty });
    }
    if is_assignable(&then_ty, &else_ty, classes) {
        return Some(else_ty);
    }
    checker.error(CompilationError::type_mismatch(
        &else_ty,
        &then_ty,
        expr.else_expr.span(),
    ));
    None
}
