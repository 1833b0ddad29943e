//! Expression type inference.
//!
//! [`MethodChecker::infer`] computes the static type of an expression and
//! reports rule violations as it goes. `None` means the type is unknown:
//! something inside the expression was already reported, and rules that
//! would need the type stay silent instead of cascading.

mod assignment;
mod binary;
mod calls;
mod identifiers;
mod member;
mod ternary;
mod unary;

use talon_ast::{Expr, LiteralKind};
use talon_core::{CompilationError, DataType};
use talon_registry::runtime::query::row_list_type;

use crate::checker::MethodChecker;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    /// Synthesize the type of an expression.
    pub fn infer(&mut self, expr: &Expr<'ast>) -> Option<DataType> {
        match expr {
            Expr::Literal(lit) => Some(literal_type(&lit.kind)),
            Expr::Ident(ident) => identifiers::check_ident(self, ident),
            Expr::This(span) => identifiers::check_this(self, *span),
            Expr::Member(member) => member::check_member(self, member),
            Expr::Call(call) => calls::check_call(self, call),
            Expr::New(new) => calls::check_new(self, new),
            Expr::Index(index) => member::check_index(self, index),
            Expr::Binary(bin) => binary::check_binary(self, bin),
            Expr::Unary(un) => unary::check_unary(self, un),
            Expr::Postfix(post) => unary::check_postfix(self, post),
            Expr::Assign(assign) => assignment::check_assign(self, assign),
            Expr::Ternary(ternary) => ternary::check_ternary(self, ternary),
            Expr::Query(_) => Some(row_list_type()),
        }
    }

    /// Infer a condition and require it to be Boolean.
    pub(crate) fn check_condition(&mut self, condition: &Expr<'ast>) {
        if let Some(ty) = self.infer(condition)
            && !ty.is_boolean()
        {
            self.error(CompilationError::condition_not_boolean(&ty, condition.span()));
        }
    }

    /// Infer a value stored into a slot of type `target`, reporting a
    /// mismatch.
    pub(crate) fn check_stored(&mut self, value: &Expr<'ast>, target: Option<&DataType>) {
        let actual = self.infer(value);
        if let (Some(actual), Some(target)) = (actual, target)
            && !crate::conversion::fits_exactly(&actual, target)
        {
            self.error(CompilationError::type_mismatch(&actual, target, value.span()));
        }
    }
}

fn literal_type(kind: &LiteralKind<'_>) -> DataType {
    match kind {
        LiteralKind::Integer(_) => DataType::integer(),
        LiteralKind::Double(_) => DataType::double(),
        LiteralKind::Boolean(_) => DataType::boolean(),
        LiteralKind::String(_) => DataType::string(),
        LiteralKind::Null => DataType::null(),
    }
}
