//! Prefix and postfix operators.

use talon_ast::{Expr, PostfixExpr, UnaryExpr, UnaryOp};
use talon_core::{CompilationError, DataType, Span};

use crate::checker::MethodChecker;

/// Type of `+a`, `-a`, `!a`, `++a`, `--a`.
pub fn check_unary<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    expr: &UnaryExpr<'ast>,
) -> Option<DataType> {
    if expr.op.mutates() {
        return check_step(checker, expr.operand, expr.span);
    }
    let operand = checker.infer(expr.operand)?;
    match expr.op {
        UnaryOp::Not if !operand.is_boolean() => {
            checker.error(CompilationError::must_be_boolean(&operand, expr.span));
            None
        }
        UnaryOp::Plus | UnaryOp::Neg if !operand.is_integer() => {
            checker.error(CompilationError::must_be_integer(&operand, expr.span));
            None
        }
        _ => Some(operand),
    }
}

/// Type of `a++` and `a--`.
pub fn check_postfix<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    expr: &PostfixExpr<'ast>,
) -> Option<DataType> {
    check_step(checker, expr.operand, expr.span)
}

/// Increment and decrement need an assignable Integer operand.
fn check_step<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    operand: &Expr<'ast>,
    span: Span,
) -> Option<DataType> {
    let ty = checker.infer(operand)?;
    if !ty.is_integer() {
        checker.error(CompilationError::must_be_integer(&ty, span));
        return None;
    }
    if !operand.is_lvalue() {
        checker.error(CompilationError::not_assignable(span));
        return None;
    }
    Some(ty)
}
