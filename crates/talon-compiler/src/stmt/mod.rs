//! Statement checking.
//!
//! Handles:
//! - Blocks, each with its own variable scope
//! - Local variable declarations
//! - Conditions of `if`, `while`, `do`-`while` and `for`
//! - Loop bodies, tracking loop depth for `break`/`continue`
//! - Return values against the declared return type

mod if_stmt;
mod loops;
mod return_stmt;
mod var_decl;

use talon_ast::{Block, Stmt};

use crate::checker::MethodChecker;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    /// Check one statement.
    pub fn check_stmt(&mut self, stmt: &Stmt<'ast>) {
        match stmt {
            Stmt::Expr(expr) => {
                self.infer(expr.expr);
            }
            Stmt::VarDecl(decl) => self.check_var_decl(decl),
            Stmt::Block(block) => self.check_block(block),
            Stmt::If(if_stmt) => self.check_if(if_stmt),
            Stmt::While(while_stmt) => self.check_while(while_stmt),
            Stmt::DoWhile(do_while) => self.check_do_while(do_while),
            Stmt::For(for_stmt) => self.check_for(for_stmt),
            Stmt::Foreach(foreach) => self.check_foreach(foreach),
            Stmt::Return(ret) => self.check_return(ret),
            Stmt::Break(brk) => self.check_break(brk.span),
            Stmt::Continue(cont) => self.check_continue(cont.span),
        }
    }

    /// Check a nested block in its own scope.
    pub fn check_block(&mut self, block: &Block<'ast>) {
        self.scope.push_scope();
        for stmt in block.stmts {
            self.check_stmt(stmt);
        }
        self.scope.pop_scope();
    }
}
