//! If/else statements.

use talon_ast::IfStmt;

use crate::checker::MethodChecker;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    pub fn check_if(&mut self, if_stmt: &IfStmt<'ast>) {
        self.check_condition(if_stmt.condition);
        self.check_branch(if_stmt.then_stmt);
        if let Some(else_stmt) = if_stmt.else_stmt {
            self.check_branch(else_stmt);
        }
    }
}
