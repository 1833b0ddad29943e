//! Field descriptors.

use talon_ast::Expr;
use talon_core::{DataType, Modifiers, Span};

use crate::NameMap;

/// A declared field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'ast> {
    pub name: String,
    pub data_type: DataType,
    pub modifiers: Modifiers,
    /// Initializer evaluated when the owner is instantiated (instance
    /// fields) or first touched (static fields).
    pub init: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

impl FieldDescriptor<'_> {
    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// Fields of one class keyed by name.
pub type FieldTable<'ast> = NameMap<FieldDescriptor<'ast>>;
