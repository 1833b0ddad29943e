//! Bare names and `this`.
//!
//! A bare name resolves as a local variable, then as a field of the
//! enclosing class (instance before static). Class names are only
//! meaningful as receivers (see [`super::member`]).

use talon_ast::Ident;
use talon_core::{CompilationError, DataType, Span};

use crate::checker::MethodChecker;

/// Type of a bare identifier used as a value.
pub fn check_ident<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    ident: &Ident<'ast>,
) -> Option<DataType> {
    match lookup_value(checker, ident) {
        Some(ty) => ty,
        None => {
            checker.error(CompilationError::undefined("variable", ident.name, ident.span));
            None
        }
    }
}

/// Resolve a bare name as a local or a field of the enclosing class.
///
/// The outer `None` means the name is not a value at all; `Some(None)`
/// means it is, but its type is unknown (already reported).
pub(super) fn lookup_value<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    ident: &Ident<'ast>,
) -> Option<Option<DataType>> {
    if let Some(var) = checker.scope.lookup(ident.name) {
        return Some(var.data_type.clone());
    }

    let class = checker.ctx.class();
    let classes = checker.classes();
    if let Some(field) = class.find_instance_field(ident.name, classes) {
        if checker.is_static {
            checker.error(CompilationError::static_context(ident.name, ident.span));
            return Some(None);
        }
        return Some(Some(field.data_type.clone()));
    }
    class
        .find_static_field(ident.name, classes)
        .map(|(_, field)| Some(field.data_type.clone()))
}

/// Type of `this`: the enclosing class, outside static code.
pub fn check_this(checker: &mut MethodChecker<'_, '_, '_>, span: Span) -> Option<DataType> {
    if checker.is_static {
        checker.error(CompilationError::static_context("this", span));
        return None;
    }
    Some(checker.ctx.class().data_type())
}
