//! Class descriptors and the class table.

use std::rc::Rc;

use talon_core::{DataType, Modifiers, Span};

use super::{FieldDescriptor, FieldTable, MethodDescriptor, MethodTable};
use crate::NameMap;

/// A registered class: user-declared or built in.
///
/// Descriptors are immutable once type checking starts. Static field
/// *values* live in the interpreter, not here.
#[derive(Debug, Clone)]
pub struct ClassDescriptor<'ast> {
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<String>,
    pub super_class: Option<DataType>,
    pub interfaces: Vec<DataType>,
    /// Generic parameter names (`T`, `K`, `V`); built-in containers only.
    pub type_params: Vec<String>,
    pub instance_fields: FieldTable<'ast>,
    pub static_fields: FieldTable<'ast>,
    pub instance_methods: MethodTable<'ast>,
    pub static_methods: MethodTable<'ast>,
    /// Constructor overloads in declaration order.
    pub constructors: Vec<Rc<MethodDescriptor<'ast>>>,
    pub inner_classes: ClassTable<'ast>,
    pub span: Span,
}

impl<'ast> ClassDescriptor<'ast> {
    pub fn with_type_params(mut self, params: &[&str]) -> Self {
        self.type_params = params.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor<'ast>) {
        if field.is_static() {
            self.static_fields.insert(field.name.clone(), field);
        } else {
            self.instance_fields.insert(field.name.clone(), field);
        }
    }

    /// Add a method to the static or instance table according to its
    /// modifiers.
    pub fn add_method(&mut self, method: MethodDescriptor<'ast>) {
        if method.is_static() {
            self.static_methods.add(method);
        } else {
            self.instance_methods.add(method);
        }
    }

    pub fn add_constructor(&mut self, constructor: MethodDescriptor<'ast>) {
        self.constructors.push(Rc::new(constructor));
    }

    pub fn data_type(&self) -> DataType {
        DataType::simple(self.name.clone())
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    /// This class followed by its superclasses, nearest first.
    pub fn chain<'t>(&'t self, classes: &'t ClassTable<'ast>) -> SuperclassChain<'t, 'ast> {
        SuperclassChain {
            next: Some(self),
            classes,
            remaining: classes.len() + 1,
        }
    }

    /// Instance overloads for `name`, from the nearest class in the
    /// superclass chain that declares it.
    pub fn find_instance_methods<'t>(
        &'t self,
        name: &str,
        classes: &'t ClassTable<'ast>,
    ) -> Option<&'t [Rc<MethodDescriptor<'ast>>]> {
        self.chain(classes)
            .find_map(|class| class.instance_methods.get(name))
    }

    pub fn find_static_methods<'t>(
        &'t self,
        name: &str,
        classes: &'t ClassTable<'ast>,
    ) -> Option<&'t [Rc<MethodDescriptor<'ast>>]> {
        self.chain(classes).find_map(|class| class.static_methods.get(name))
    }

    pub fn find_instance_field<'t>(
        &'t self,
        name: &str,
        classes: &'t ClassTable<'ast>,
    ) -> Option<&'t FieldDescriptor<'ast>> {
        self.chain(classes)
            .find_map(|class| class.instance_fields.get(name))
    }

    /// The static field and the class that declares it.
    pub fn find_static_field<'t>(
        &'t self,
        name: &str,
        classes: &'t ClassTable<'ast>,
    ) -> Option<(&'t ClassDescriptor<'ast>, &'t FieldDescriptor<'ast>)> {
        self.chain(classes)
            .find_map(|class| class.static_fields.get(name).map(|f| (class, f)))
    }

    /// Instance fields of the whole chain, base class first.
    pub fn all_instance_fields<'t>(
        &'t self,
        classes: &'t ClassTable<'ast>,
    ) -> Vec<&'t FieldDescriptor<'ast>> {
        let chain: Vec<_> = self.chain(classes).collect();
        chain
            .into_iter()
            .rev()
            .flat_map(|class| class.instance_fields.values())
            .collect()
    }

    /// Whether `self` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, ancestor: &str, classes: &ClassTable<'ast>) -> bool {
        self.chain(classes)
            .any(|class| class.name.eq_ignore_ascii_case(ancestor))
            || self
                .interfaces
                .iter()
                .any(|interface| interface.is(ancestor))
    }
}

/// Iterator over a class and its superclasses.
///
/// Stops at the first superclass missing from the table and never yields
/// more classes than the table holds, so an inheritance cycle ends the
/// walk instead of looping.
pub struct SuperclassChain<'t, 'ast> {
    next: Option<&'t ClassDescriptor<'ast>>,
    classes: &'t ClassTable<'ast>,
    remaining: usize,
}

impl<'t, 'ast> Iterator for SuperclassChain<'t, 'ast> {
    type Item = &'t ClassDescriptor<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next.take()?;
        self.next = current
            .super_class
            .as_ref()
            .and_then(|parent| self.classes.resolve(parent.name()))
            .map(Rc::as_ref);
        Some(current)
    }
}

/// Registered classes keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ClassTable<'ast> {
    classes: NameMap<Rc<ClassDescriptor<'ast>>>,
}

impl<'ast> ClassTable<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the primitive and container classes.
    pub fn with_primitives() -> Self {
        let mut table = Self::new();
        crate::builtins::install(&mut table);
        table
    }

    /// Insert or replace a class. Returns the replaced class.
    pub fn insert(&mut self, class: ClassDescriptor<'ast>) -> Option<Rc<ClassDescriptor<'ast>>> {
        self.classes.insert(class.name.clone(), Rc::new(class))
    }

    pub fn get(&self, name: &str) -> Option<&Rc<ClassDescriptor<'ast>>> {
        self.classes.get(name)
    }

    /// Look up a possibly dotted name (`Outer.Inner`) through inner-class
    /// tables.
    pub fn resolve(&self, name: &str) -> Option<&Rc<ClassDescriptor<'ast>>> {
        let mut parts = name.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.inner_classes.get(part)?;
        }
        Some(current)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<ClassDescriptor<'ast>>> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
