//! Return statements.

use talon_ast::ReturnStmt;
use talon_core::{CompilationError, DataType};

use crate::checker::MethodChecker;
use crate::conversion::fits_exactly;

impl<'c, 'a, 'ast> MethodChecker<'c, 'a, 'ast> {
    /// Check a return against the declared return type. A missing value
    /// or a void method counts as `void` in the mismatch message.
    pub fn check_return(&mut self, ret: &ReturnStmt<'ast>) {
        let Some(declared) = self.return_type.clone() else {
            if let Some(value) = ret.value {
                self.infer(value);
            }
            return;
        };
        let Some(value) = ret.value else {
            if !declared.is_void() {
                self.error(CompilationError::return_mismatch(
                    &DataType::void(),
                    &declared,
                    ret.span,
                ));
            }
            return;
        };

        let Some(actual) = self.infer(value) else {
            return;
        };
        let matches = if declared.is_void() {
            false
        } else {
            fits_exactly(&actual, &declared)
        };
        if !matches {
            self.error(CompilationError::return_mismatch(&actual, &declared, ret.span));
        }
    }
}
