//! Statement execution.

use talon_ast::{
    DoWhileStmt, Expr, ForInit, ForStmt, ForeachStmt, IfStmt, Stmt, VarDeclStmt, WhileStmt,
};
use talon_core::RuntimeError;
use talon_registry::Value;

use super::{Flow, Interpreter, ops};

impl<'r, 'ast> Interpreter<'r, 'ast> {
    /// Run statements in order until one does not complete normally.
    pub(crate) fn exec_stmts(&mut self, stmts: &[Stmt<'ast>]) -> Result<Flow<'ast>, RuntimeError> {
        for stmt in stmts {
            let flow = self.exec(stmt)?;
            if !flow.is_normal() {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn exec(&mut self, stmt: &Stmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        match stmt {
            Stmt::Expr(stmt) => {
                self.eval(stmt.expr)?;
                Ok(Flow::Normal)
            }
            Stmt::VarDecl(decl) => {
                self.declare_vars(decl)?;
                Ok(Flow::Normal)
            }
            Stmt::Block(block) => self.scoped(|this| this.exec_stmts(block.stmts)),
            Stmt::If(stmt) => self.exec_if(stmt),
            Stmt::While(stmt) => self.exec_while(stmt),
            Stmt::DoWhile(stmt) => self.exec_do_while(stmt),
            Stmt::For(stmt) => self.scoped(|this| this.exec_for(stmt)),
            Stmt::Foreach(stmt) => self.exec_foreach(stmt),
            Stmt::Return(stmt) => {
                let value = match stmt.value {
                    Some(expr) => Some(self.eval(expr)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Break(_) => Ok(Flow::Break),
            Stmt::Continue(_) => Ok(Flow::Continue),
        }
    }

    /// Run `f` inside a fresh block scope.
    fn scoped<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, RuntimeError>,
    ) -> Result<T, RuntimeError> {
        self.frame_mut()?.push_scope();
        let result = f(self);
        if let Ok(frame) = self.frame_mut() {
            frame.pop_scope();
        }
        result
    }

    fn declare_vars(&mut self, decl: &VarDeclStmt<'ast>) -> Result<(), RuntimeError> {
        for var in decl.vars {
            let value = match var.init {
                Some(init) => self.eval(init)?,
                None => Value::Null,
            };
            self.frame_mut()?.declare(var.name.name, value);
        }
        Ok(())
    }

    fn condition(&mut self, condition: &Expr<'ast>) -> Result<bool, RuntimeError> {
        let value = self.eval(condition)?;
        ops::truthy(&value, condition.span())
    }

    /// A branch or loop body gets its own scope even without braces.
    fn exec_branch(&mut self, stmt: &Stmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        self.scoped(|this| this.exec(stmt))
    }

    /// Run one loop body. `Some` ends the loop with the flow to propagate.
    fn loop_body(&mut self, body: &Stmt<'ast>) -> Result<Option<Flow<'ast>>, RuntimeError> {
        match self.exec_branch(body)? {
            Flow::Break => Ok(Some(Flow::Normal)),
            flow @ Flow::Return(_) => Ok(Some(flow)),
            Flow::Normal | Flow::Continue => Ok(None),
        }
    }

    fn exec_if(&mut self, stmt: &IfStmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        if self.condition(stmt.condition)? {
            self.exec_branch(stmt.then_stmt)
        } else if let Some(else_stmt) = stmt.else_stmt {
            self.exec_branch(else_stmt)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn exec_while(&mut self, stmt: &WhileStmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        while self.condition(stmt.condition)? {
            if let Some(flow) = self.loop_body(stmt.body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_do_while(&mut self, stmt: &DoWhileStmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        loop {
            if let Some(flow) = self.loop_body(stmt.body)? {
                return Ok(flow);
            }
            if !self.condition(stmt.condition)? {
                return Ok(Flow::Normal);
            }
        }
    }

    /// The initializer runs once; the update runs after every body that
    /// completes or continues.
    fn exec_for(&mut self, stmt: &ForStmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        match stmt.init {
            Some(ForInit::VarDecl(decl)) => self.declare_vars(&decl)?,
            Some(ForInit::Exprs(exprs)) => {
                for expr in exprs {
                    self.eval(expr)?;
                }
            }
            None => {}
        }
        loop {
            if let Some(condition) = stmt.condition
                && !self.condition(condition)?
            {
                return Ok(Flow::Normal);
            }
            if let Some(flow) = self.loop_body(stmt.body)? {
                return Ok(flow);
            }
            for update in stmt.update {
                self.eval(update)?;
            }
        }
    }

    /// Iterates over a snapshot of the list taken before the first pass.
    fn exec_foreach(&mut self, stmt: &ForeachStmt<'ast>) -> Result<Flow<'ast>, RuntimeError> {
        let collection = self.eval(stmt.iterable)?;
        let Some(list) = collection.as_object() else {
            return Err(RuntimeError::NullReference {
                span: stmt.iterable.span(),
            });
        };
        let items = list.list()?.clone();
        for item in items {
            let flow = self.scoped(|this| {
                this.frame_mut()?.declare(stmt.var.name, item);
                this.loop_body(stmt.body)
            })?;
            if let Some(flow) = flow {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }
}
