//! Loops and loop control.

use talon_ast::{DoWhileStmt, ForInit, ForStmt, ForeachStmt, Stmt, WhileStmt};
use talon_core::{CompilationError, Span};

use crate::checker::MethodChecker;
use crate::conversion::fits_exactly;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    pub fn check_while(&mut self, while_stmt: &WhileStmt<'ast>) {
        self.check_condition(while_stmt.condition);
        self.check_loop_body(while_stmt.body);
    }

    pub fn check_do_while(&mut self, do_while: &DoWhileStmt<'ast>) {
        self.check_loop_body(do_while.body);
        self.check_condition(do_while.condition);
    }

    /// Check a `for` loop. Variables declared by the initializer are
    /// visible in the condition, the updates and the body only.
    pub fn check_for(&mut self, for_stmt: &ForStmt<'ast>) {
        self.scope.push_scope();

        match &for_stmt.init {
            Some(ForInit::VarDecl(decl)) => self.check_var_decl(decl),
            Some(ForInit::Exprs(exprs)) => {
                for expr in exprs.iter() {
                    self.infer(expr);
                }
            }
            None => {}
        }
        if let Some(condition) = for_stmt.condition {
            self.check_condition(condition);
        }
        for update in for_stmt.update {
            self.infer(update);
        }
        self.check_loop_body(for_stmt.body);

        self.scope.pop_scope();
    }

    /// Check `for (Type v : collection)`. The collection must be a List
    /// whose elements fit the loop variable's type.
    pub fn check_foreach(&mut self, foreach: &ForeachStmt<'ast>) {
        let declared = self
            .ctx
            .resolve_type(&foreach.ty.to_data_type(), foreach.ty.span);

        if let Some(collection) = self.infer(foreach.iterable) {
            if !collection.is_list() {
                self.error(CompilationError::not_iterable(
                    &collection,
                    foreach.iterable.span(),
                ));
            } else if let (Some(element), Some(declared)) = (collection.args().first(), &declared)
                && !fits_exactly(element, declared)
            {
                self.error(CompilationError::type_mismatch(element, declared, foreach.span));
            }
        }

        self.scope.push_scope();
        self.declare_local(foreach.var.name, declared, foreach.var.span);
        self.check_loop_body(foreach.body);
        self.scope.pop_scope();
    }

    pub fn check_break(&mut self, span: Span) {
        if self.loop_depth == 0 {
            self.error(CompilationError::break_outside_loop(span));
        }
    }

    pub fn check_continue(&mut self, span: Span) {
        if self.loop_depth == 0 {
            self.error(CompilationError::continue_outside_loop(span));
        }
    }

    fn check_loop_body(&mut self, body: &Stmt<'ast>) {
        self.loop_depth += 1;
        self.check_branch(body);
        self.loop_depth -= 1;
    }

    /// A single statement used as a branch or loop body gets its own scope.
    pub(crate) fn check_branch(&mut self, stmt: &Stmt<'ast>) {
        match stmt {
            Stmt::Block(block) => self.check_block(block),
            other => {
                self.scope.push_scope();
                self.check_stmt(other);
                self.scope.pop_scope();
            }
        }
    }
}
