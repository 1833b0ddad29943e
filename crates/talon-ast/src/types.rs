//! Identifiers and type references.

use talon_core::{DataType, Span};

/// A name as written in source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ident<'ast> {
    pub name: &'ast str,
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }

    /// Case-insensitive name comparison.
    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A written type such as `Integer` or `Map<String, List<Account>>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeRef<'ast> {
    /// Class name
    pub name: Ident<'ast>,
    /// Generic arguments (empty for non-generic types)
    pub args: &'ast [TypeRef<'ast>],
    pub span: Span,
}

impl<'ast> TypeRef<'ast> {
    /// Convert into the owned type name used by the checker and runtime.
    pub fn to_data_type(&self) -> DataType {
        if self.args.is_empty() {
            DataType::simple(self.name.name)
        } else {
            DataType::generic(
                self.name.name,
                self.args.iter().map(TypeRef::to_data_type).collect(),
            )
        }
    }
}
