//! Activation records.

use std::rc::Rc;

use talon_registry::{ClassDescriptor, Object, Value, ValueTable};

/// One method activation: the class it runs in, the receiver and a chain
/// of block scopes, innermost last.
#[derive(Debug)]
pub struct Frame<'ast> {
    pub class: Rc<ClassDescriptor<'ast>>,
    /// `None` in static methods and static field initializers
    pub this: Option<Rc<Object<'ast>>>,
    scopes: Vec<ValueTable<'ast>>,
}

impl<'ast> Frame<'ast> {
    pub fn new(class: Rc<ClassDescriptor<'ast>>, this: Option<Rc<Object<'ast>>>) -> Self {
        Self {
            class,
            this,
            scopes: vec![ValueTable::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(ValueTable::new());
    }

    /// Drop the innermost scope. The method's outermost scope stays.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope.
    pub fn declare(&mut self, name: &str, value: Value<'ast>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// Look a local up, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Value<'ast>> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn is_local(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Overwrite the nearest binding of `name`. Returns `false` when no
    /// scope declares it.
    pub fn assign(&mut self, name: &str, value: Value<'ast>) -> bool {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talon_core::Modifiers;
    use talon_registry::{ClassTable, Primitives, create_class};

    fn frame() -> Frame<'static> {
        Frame::new(Rc::new(create_class("Main", Modifiers::PUBLIC)), None)
    }

    #[test]
    fn inner_scopes_shadow_and_unwind() {
        let classes = ClassTable::with_primitives();
        let prims = Primitives::resolve(&classes).expect("primitives");
        let mut frame = frame();
        frame.declare("x", prims.integer(1));
        frame.push_scope();
        frame.declare("X", prims.integer(2));
        assert_eq!(frame.lookup("x").and_then(Value::as_integer), Some(2));
        frame.pop_scope();
        assert_eq!(frame.lookup("x").and_then(Value::as_integer), Some(1));
    }

    #[test]
    fn assignment_reaches_outer_scopes() {
        let classes = ClassTable::with_primitives();
        let prims = Primitives::resolve(&classes).expect("primitives");
        let mut frame = frame();
        frame.declare("total", prims.integer(0));
        frame.push_scope();
        assert!(frame.assign("total", prims.integer(5)));
        assert!(!frame.assign("missing", prims.integer(5)));
        frame.pop_scope();
        assert_eq!(frame.lookup("total").and_then(Value::as_integer), Some(5));
    }

    #[test]
    fn outermost_scope_is_kept() {
        let mut frame = frame();
        frame.pop_scope();
        frame.declare("a", Value::Null);
        assert!(frame.is_local("a"));
    }
}
