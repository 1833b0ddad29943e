//! Uniform constructors for descriptors.

use talon_core::{DataType, Modifiers, Span};

use crate::entries::{
    ClassDescriptor, ClassTable, FieldDescriptor, FieldTable, MethodBody, MethodDescriptor,
    MethodParam, MethodTable,
};

/// An empty class.
pub fn create_class<'ast>(name: impl Into<String>, modifiers: Modifiers) -> ClassDescriptor<'ast> {
    ClassDescriptor {
        name: name.into(),
        modifiers,
        annotations: Vec::new(),
        super_class: None,
        interfaces: Vec::new(),
        type_params: Vec::new(),
        instance_fields: FieldTable::new(),
        static_fields: FieldTable::new(),
        instance_methods: MethodTable::new(),
        static_methods: MethodTable::new(),
        constructors: Vec::new(),
        inner_classes: ClassTable::new(),
        span: Span::default(),
    }
}

/// A public method.
pub fn create_method<'ast>(
    name: impl Into<String>,
    return_type: Option<DataType>,
    params: Vec<MethodParam>,
    body: MethodBody<'ast>,
) -> MethodDescriptor<'ast> {
    MethodDescriptor {
        name: name.into(),
        modifiers: Modifiers::PUBLIC,
        return_type,
        params,
        body,
        span: Span::default(),
    }
}

/// A public field without initializer.
pub fn create_field<'ast>(name: impl Into<String>, data_type: DataType) -> FieldDescriptor<'ast> {
    FieldDescriptor {
        name: name.into(),
        data_type,
        modifiers: Modifiers::PUBLIC,
        init: None,
        span: Span::default(),
    }
}
