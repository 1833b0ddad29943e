//! Per-method checking state.
//!
//! A [`MethodChecker`] walks one method body (or one field initializer).
//! Expression rules live in [`crate::expr`], statement rules in
//! [`crate::stmt`]; both push their diagnostics into the shared
//! [`CheckContext`].

use talon_ast::Block;
use talon_core::{CompilationError, DataType, Span};
use talon_registry::{ClassTable, MethodParam};

use crate::context::CheckContext;
use crate::scope::LocalScope;

/// Checks the statements and expressions of one method.
pub struct MethodChecker<'c, 'a, 'ast> {
    pub(crate) ctx: &'c mut CheckContext<'a, 'ast>,
    pub(crate) scope: LocalScope,
    /// Declared return type (`void` for constructors and void methods);
    /// `None` when it did not resolve
    pub(crate) return_type: Option<DataType>,
    /// Static methods and static field initializers have no `this`
    pub(crate) is_static: bool,
    /// Number of enclosing loops
    pub(crate) loop_depth: u32,
}

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    pub fn new(
        ctx: &'c mut CheckContext<'a, 'ast>,
        return_type: Option<DataType>,
        is_static: bool,
    ) -> Self {
        Self {
            ctx,
            scope: LocalScope::new(),
            return_type,
            is_static,
            loop_depth: 0,
        }
    }

    #[inline]
    pub(crate) fn classes(&self) -> &'a ClassTable<'ast> {
        self.ctx.classes()
    }

    #[inline]
    pub(crate) fn error(&mut self, error: CompilationError) {
        self.ctx.error(error);
    }

    /// Declare the method's parameters. Parameters whose type does not
    /// resolve are declared with an unknown type.
    pub fn declare_params(&mut self, params: &[MethodParam], span: Span) {
        for param in params {
            let ty = self.ctx.resolve_type(&param.data_type, span);
            self.declare_local(&param.name, ty, span);
        }
    }

    /// Check a method body. Its top-level statements share the parameters'
    /// block, so a local cannot redeclare a parameter.
    pub fn check_body(&mut self, body: &Block<'ast>) {
        for stmt in body.stmts {
            self.check_stmt(stmt);
        }
    }

    /// Declare a local, reporting a redeclaration in the same block.
    pub(crate) fn declare_local(&mut self, name: &str, ty: Option<DataType>, span: Span) {
        if let Err(e) = self.scope.declare(name, ty, span) {
            self.error(e);
        }
    }
}
