//! Method descriptors and overload groups.

use std::fmt;
use std::rc::Rc;

use talon_ast::Block;
use talon_core::{DataType, Modifiers, Span, Visibility};

use crate::NameMap;
use crate::runtime::NativeFn;

/// One method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodParam {
    pub name: String,
    pub data_type: DataType,
}

impl MethodParam {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// What runs when a method is invoked.
#[derive(Clone, Copy)]
pub enum MethodBody<'ast> {
    /// Statements from a class declaration
    Script(Block<'ast>),
    /// A host function
    Native(NativeFn<'ast>),
    /// No body (abstract or interface method)
    Abstract,
}

impl fmt::Debug for MethodBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodBody::Script(block) => f
                .debug_tuple("Script")
                .field(&block.stmts.len())
                .finish(),
            MethodBody::Native(_) => f.write_str("Native"),
            MethodBody::Abstract => f.write_str("Abstract"),
        }
    }
}

/// A method or constructor.
#[derive(Debug, Clone)]
pub struct MethodDescriptor<'ast> {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` means `void`.
    pub return_type: Option<DataType>,
    pub params: Vec<MethodParam>,
    pub body: MethodBody<'ast>,
    pub span: Span,
}

impl<'ast> MethodDescriptor<'ast> {
    /// A public native method with unnamed parameters.
    pub fn native(
        name: impl Into<String>,
        return_type: Option<DataType>,
        param_types: Vec<DataType>,
        function: NativeFn<'ast>,
    ) -> Self {
        let params = param_types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| MethodParam::new(format!("p{i}"), ty))
            .collect();
        crate::create_method(name, return_type, params, MethodBody::Native(function))
    }

    /// A static variant of [`MethodDescriptor::native`].
    pub fn native_static(
        name: impl Into<String>,
        return_type: Option<DataType>,
        param_types: Vec<DataType>,
        function: NativeFn<'ast>,
    ) -> Self {
        let mut method = Self::native(name, return_type, param_types, function);
        method.modifiers |= Modifiers::STATIC;
        method
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn param_types(&self) -> impl Iterator<Item = &DataType> {
        self.params.iter().map(|p| &p.data_type)
    }

    /// The return type, with `void` standing in for an absent one.
    pub fn return_type_or_void(&self) -> DataType {
        self.return_type.clone().unwrap_or_else(DataType::void)
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers.visibility()
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    /// Whether both methods take the same parameter types in order.
    /// Return types and modifiers do not take part.
    pub fn same_signature(&self, other: &MethodDescriptor<'_>) -> bool {
        self.params.len() == other.params.len()
            && self.param_types().zip(other.param_types()).all(|(a, b)| a == b)
    }
}

/// Overload groups keyed by method name, each in declaration order.
#[derive(Debug, Clone, Default)]
pub struct MethodTable<'ast> {
    groups: NameMap<Vec<Rc<MethodDescriptor<'ast>>>>,
}

impl<'ast> MethodTable<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a method to the group for its name.
    pub fn add(&mut self, method: MethodDescriptor<'ast>) {
        let method = Rc::new(method);
        match self.groups.get_mut(&method.name) {
            Some(group) => group.push(method),
            None => {
                self.groups.insert(method.name.clone(), vec![method]);
            }
        }
    }

    /// All overloads for a name.
    pub fn get(&self, name: &str) -> Option<&[Rc<MethodDescriptor<'ast>>]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains(name)
    }

    /// Overload groups in first-declaration order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[Rc<MethodDescriptor<'ast>>])> {
        self.groups.iter().map(|(name, group)| (name, group.as_slice()))
    }

    /// Every method, group by group.
    pub fn all(&self) -> impl Iterator<Item = &Rc<MethodDescriptor<'ast>>> {
        self.groups.values().flatten()
    }

    /// Number of distinct method names.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{CallContext, NativeResult};

    fn noop<'ast>(_ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
        Ok(None)
    }

    #[test]
    fn overloads_are_grouped_in_order() {
        let mut table = MethodTable::new();
        table.add(MethodDescriptor::native("bar", None, vec![DataType::integer()], noop));
        table.add(MethodDescriptor::native("foo", None, vec![], noop));
        table.add(MethodDescriptor::native("Bar", None, vec![DataType::string()], noop));

        let group = table.get("BAR").map(|g| g.len());
        assert_eq!(group, Some(2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.all().count(), 3);

        let names: Vec<_> = table.groups().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["bar", "foo"]);
    }

    #[test]
    fn signature_ignores_return_type() {
        let a = MethodDescriptor::native("bar", None, vec![DataType::integer()], noop);
        let b = MethodDescriptor::native(
            "bar",
            Some(DataType::string()),
            vec![DataType::simple("integer")],
            noop,
        );
        let c = MethodDescriptor::native("bar", None, vec![DataType::string()], noop);
        assert!(a.same_signature(&b));
        assert!(!a.same_signature(&c));
    }

    #[test]
    fn absent_return_type_is_void() {
        let m = MethodDescriptor::native("run", None, vec![], noop);
        assert!(m.return_type_or_void().is_void());
        assert_eq!(m.visibility(), Visibility::Public);
        assert!(MethodDescriptor::native_static("run", None, vec![], noop).is_static());
    }
}
