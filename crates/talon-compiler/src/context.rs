//! CheckContext - class-level state shared by every method checker.

use std::rc::Rc;

use talon_core::{CompilationError, CompilationErrors, DataType, Span};
use talon_registry::{ClassDescriptor, ClassTable};

/// The class being checked, the table it resolves names against, and the
/// errors collected so far.
pub struct CheckContext<'a, 'ast> {
    classes: &'a ClassTable<'ast>,
    class: &'a ClassDescriptor<'ast>,
    errors: Vec<CompilationError>,
}

impl<'a, 'ast> CheckContext<'a, 'ast> {
    pub fn new(classes: &'a ClassTable<'ast>, class: &'a ClassDescriptor<'ast>) -> Self {
        Self {
            classes,
            class,
            errors: Vec::new(),
        }
    }

    #[inline]
    pub fn classes(&self) -> &'a ClassTable<'ast> {
        self.classes
    }

    /// The enclosing class.
    #[inline]
    pub fn class(&self) -> &'a ClassDescriptor<'ast> {
        self.class
    }

    pub fn error(&mut self, error: CompilationError) {
        self.errors.push(error);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn into_errors(self) -> CompilationErrors {
        CompilationErrors::from(self.errors)
    }

    /// Find a class by name: inner classes of the enclosing class first,
    /// then the class table (dotted names allowed).
    pub fn lookup_class(&self, name: &str) -> Option<&'a Rc<ClassDescriptor<'ast>>> {
        self.class
            .inner_classes
            .get(name)
            .or_else(|| self.classes.resolve(name))
    }

    /// Whether `class` is the enclosing class.
    pub fn is_current(&self, class: &ClassDescriptor<'_>) -> bool {
        class.name.eq_ignore_ascii_case(&self.class.name)
    }

    /// Check that a written type names known classes, reporting the first
    /// unknown name. `void` is accepted.
    pub fn resolve_type(&mut self, ty: &DataType, span: Span) -> Option<DataType> {
        match self.first_unknown(ty) {
            Some(name) => {
                self.error(CompilationError::undefined("type", &name, span));
                None
            }
            None => Some(ty.clone()),
        }
    }

    fn first_unknown(&self, ty: &DataType) -> Option<String> {
        if !ty.is_void() && self.lookup_class(ty.name()).is_none() {
            return Some(ty.name().to_string());
        }
        ty.args().iter().find_map(|arg| self.first_unknown(arg))
    }
}
