//! Registration Pass (Pass 1) - build class descriptors from declarations.
//!
//! ## Responsibilities
//!
//! - Record class modifiers, annotations, superclass and interfaces
//! - Register fields, methods and constructors with their signatures
//! - Reject two overloads with identical parameter types
//! - Reject a parameter name repeated within one method
//! - Register inner classes recursively into the outer class
//!
//! Bodies are not looked at here; that is the job of
//! [`TypeCheckPass`](super::TypeCheckPass).

use log::debug;
use talon_ast::{ClassDecl, FieldDecl, MethodDecl};
use talon_core::RegistrationError;
use talon_registry::{
    ClassDescriptor, ClassTable, FieldDescriptor, MethodBody, MethodDescriptor, MethodParam,
    create_class, create_method,
};

/// Output of registering a batch of declarations.
#[derive(Debug, Default)]
pub struct RegistrationOutput {
    /// Number of classes added to the table.
    pub classes_registered: usize,
    /// One error per rejected class.
    pub errors: Vec<RegistrationError>,
}

impl RegistrationOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Pass 1: class declarations to class descriptors.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationPass;

impl RegistrationPass {
    pub fn new() -> Self {
        Self
    }

    /// Register every declaration into `classes`. A rejected class is
    /// skipped; the others still register.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn register_all<'ast>(
        &self,
        decls: &[&ClassDecl<'ast>],
        classes: &mut ClassTable<'ast>,
    ) -> RegistrationOutput {
        let mut output = RegistrationOutput::default();
        for decl in decls {
            match self.register_into(decl, classes) {
                Ok(()) => output.classes_registered += 1,
                Err(e) => output.errors.push(e),
            }
        }
        output
    }

    /// Register one declaration into `classes`, rejecting a name that is
    /// already taken.
    pub fn register_into<'ast>(
        &self,
        decl: &ClassDecl<'ast>,
        classes: &mut ClassTable<'ast>,
    ) -> Result<(), RegistrationError> {
        if classes.contains(decl.name.name) {
            return Err(RegistrationError::DuplicateClass {
                name: decl.name.name.to_string(),
                span: decl.name.span,
            });
        }
        let class = self.register(decl)?;
        classes.insert(class);
        Ok(())
    }

    /// Build the descriptor for one class declaration.
    pub fn register<'ast>(
        &self,
        decl: &ClassDecl<'ast>,
    ) -> Result<ClassDescriptor<'ast>, RegistrationError> {
        let mut class = create_class(decl.name.name, decl.modifiers);
        class.span = decl.span;
        class.annotations = decl.annotations.iter().map(|a| a.name.to_string()).collect();
        class.super_class = decl.super_class.map(|ty| ty.to_data_type());
        class.interfaces = decl.interfaces.iter().map(|ty| ty.to_data_type()).collect();

        for field in decl.fields() {
            register_field(&mut class, field)?;
        }
        for method in decl.methods() {
            let method = method_descriptor(method);
            check_duplicate_method(&class, &method)?;
            class.add_method(method);
        }
        for ctor in decl.constructors() {
            let ctor = method_descriptor(ctor);
            if class.constructors.iter().any(|c| c.same_signature(&ctor)) {
                return Err(RegistrationError::DuplicateMethod {
                    name: ctor.name,
                    span: ctor.span,
                });
            }
            class.add_constructor(ctor);
        }
        for method in decl.methods().chain(decl.constructors()) {
            check_duplicate_params(method)?;
        }
        for inner in decl.inner_classes() {
            let inner_class = self.register(inner)?;
            if class.inner_classes.contains(&inner_class.name) {
                return Err(RegistrationError::DuplicateClass {
                    name: inner_class.name,
                    span: inner.name.span,
                });
            }
            class.inner_classes.insert(inner_class);
        }

        debug!(
            "registered class {} ({} fields, {} methods, {} constructors, {} inner classes)",
            class.name,
            class.instance_fields.len() + class.static_fields.len(),
            class.instance_methods.len() + class.static_methods.len(),
            class.constructors.len(),
            class.inner_classes.len(),
        );
        Ok(class)
    }
}

fn register_field<'ast>(
    class: &mut ClassDescriptor<'ast>,
    field: &FieldDecl<'ast>,
) -> Result<(), RegistrationError> {
    let name = field.name.name;
    if class.instance_fields.contains(name) || class.static_fields.contains(name) {
        return Err(RegistrationError::DuplicateField {
            name: name.to_string(),
            span: field.name.span,
        });
    }
    class.add_field(FieldDescriptor {
        name: name.to_string(),
        data_type: field.ty.to_data_type(),
        modifiers: field.modifiers,
        init: field.init,
        span: field.span,
    });
    Ok(())
}

fn method_descriptor<'ast>(decl: &MethodDecl<'ast>) -> MethodDescriptor<'ast> {
    let return_type = decl
        .return_type
        .map(|ty| ty.to_data_type())
        .filter(|ty| !ty.is_void());
    let params = decl
        .params
        .iter()
        .map(|p| MethodParam::new(p.name.name, p.ty.to_data_type()))
        .collect();
    let body = match decl.body {
        Some(block) => MethodBody::Script(block),
        None => MethodBody::Abstract,
    };

    let mut method = create_method(decl.name.name, return_type, params, body);
    method.modifiers = decl.modifiers;
    method.span = decl.span;
    method
}

/// Overloads collide on identical parameter types, whether static or not.
fn check_duplicate_method(
    class: &ClassDescriptor<'_>,
    method: &MethodDescriptor<'_>,
) -> Result<(), RegistrationError> {
    let existing = class
        .instance_methods
        .get(&method.name)
        .into_iter()
        .chain(class.static_methods.get(&method.name))
        .flatten();
    for other in existing {
        if other.same_signature(method) {
            return Err(RegistrationError::DuplicateMethod {
                name: method.name.clone(),
                span: method.span,
            });
        }
    }
    Ok(())
}

/// The first repeated parameter name, compared as written.
fn check_duplicate_params(method: &MethodDecl<'_>) -> Result<(), RegistrationError> {
    for (i, param) in method.params.iter().enumerate() {
        if method.params[..i].iter().any(|p| p.name.name == param.name.name) {
            return Err(RegistrationError::DuplicateParameter {
                name: param.name.name.to_string(),
                span: param.span,
            });
        }
    }
    Ok(())
}
