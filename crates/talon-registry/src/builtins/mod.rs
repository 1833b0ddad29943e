//! Primitive and container classes.

mod list;
mod map;
mod primitives;

pub use list::checked_index;

use std::rc::Rc;

use talon_core::{DataType, NativeError, primitives as names};

use crate::entries::{ClassDescriptor, ClassTable};
use crate::runtime::{NativePayload, Object, Value};

/// Register Integer, Double, String, Boolean, Object, List and Map.
pub fn install(classes: &mut ClassTable<'_>) {
    classes.insert(primitives::integer_class());
    classes.insert(primitives::double_class());
    classes.insert(primitives::string_class());
    classes.insert(primitives::boolean_class());
    classes.insert(primitives::object_class());
    classes.insert(list::list_class());
    classes.insert(map::map_class());
}

/// Handles to the classes values are built from most often.
#[derive(Debug, Clone)]
pub struct Primitives<'ast> {
    integer: Rc<ClassDescriptor<'ast>>,
    double: Rc<ClassDescriptor<'ast>>,
    string: Rc<ClassDescriptor<'ast>>,
    boolean: Rc<ClassDescriptor<'ast>>,
    list: Rc<ClassDescriptor<'ast>>,
    map: Rc<ClassDescriptor<'ast>>,
}

impl<'ast> Primitives<'ast> {
    pub fn resolve(classes: &ClassTable<'ast>) -> Result<Self, NativeError> {
        let get = |name: &str| {
            classes
                .get(name)
                .cloned()
                .ok_or_else(|| NativeError::UnknownClass {
                    name: name.to_string(),
                })
        };
        Ok(Self {
            integer: get(names::INTEGER)?,
            double: get(names::DOUBLE)?,
            string: get(names::STRING)?,
            boolean: get(names::BOOLEAN)?,
            list: get(names::LIST)?,
            map: get(names::MAP)?,
        })
    }

    fn scalar(class: &Rc<ClassDescriptor<'ast>>, payload: NativePayload<'ast>) -> Value<'ast> {
        Value::from_object(Object::with_payload(Rc::clone(class), Vec::new(), payload))
    }

    pub fn integer(&self, value: i64) -> Value<'ast> {
        Self::scalar(&self.integer, NativePayload::Integer(value))
    }

    pub fn double(&self, value: f64) -> Value<'ast> {
        Self::scalar(&self.double, NativePayload::Double(value))
    }

    pub fn string(&self, value: impl Into<String>) -> Value<'ast> {
        Self::scalar(&self.string, NativePayload::String(value.into()))
    }

    pub fn boolean(&self, value: bool) -> Value<'ast> {
        Self::scalar(&self.boolean, NativePayload::Boolean(value))
    }

    /// A `List<element>` holding `items`.
    pub fn list(&self, element: DataType, items: Vec<Value<'ast>>) -> Value<'ast> {
        Value::from_object(Object::with_payload(
            Rc::clone(&self.list),
            vec![element],
            NativePayload::List(items),
        ))
    }

    /// An empty `Map<key, value>`.
    pub fn map(&self, key: DataType, value: DataType) -> Value<'ast> {
        Value::from_object(Object::with_payload(
            Rc::clone(&self.map),
            vec![key, value],
            NativePayload::Map(Default::default()),
        ))
    }
}
