//! Local variable declarations.

use talon_ast::VarDeclStmt;

use crate::checker::MethodChecker;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    /// Check `Type a = init, b;`.
    ///
    /// Each initializer is checked before its variable is declared, so it
    /// cannot refer to the variable itself.
    pub fn check_var_decl(&mut self, decl: &VarDeclStmt<'ast>) {
        let declared = self.ctx.resolve_type(&decl.ty.to_data_type(), decl.ty.span);
        for var in decl.vars {
            if let Some(init) = var.init {
                self.check_stored(init, declared.as_ref());
            }
            self.declare_local(var.name.name, declared.clone(), var.name.span);
        }
    }
}
