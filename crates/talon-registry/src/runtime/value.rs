//! Runtime values.
//!
//! Every non-null value is a shared [`Object`]. Primitive values are
//! instances of the primitive classes whose scalar sits in the payload,
//! so method dispatch is uniform across scalars and script objects.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use talon_core::{DataType, NativeError};

use super::payload::{MapKey, NativePayload};
use crate::NameMap;
use crate::entries::ClassDescriptor;

/// Collections nested deeper than this compare unequal and display as `...`.
const MAX_NESTING: usize = 64;

/// Field values of one instance keyed by field name.
pub type ValueTable<'ast> = NameMap<Value<'ast>>;

/// A runtime value. Assignment copies the reference.
#[derive(Debug, Clone, Default)]
pub enum Value<'ast> {
    #[default]
    Null,
    Object(Rc<Object<'ast>>),
}

impl<'ast> Value<'ast> {
    pub fn from_object(object: Object<'ast>) -> Self {
        Value::Object(Rc::new(object))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_object(&self) -> Option<&Rc<Object<'ast>>> {
        match self {
            Value::Object(object) => Some(object),
            Value::Null => None,
        }
    }

    /// Runtime type; `null` for [`Value::Null`].
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::null(),
            Value::Object(object) => object.data_type(),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match &*self.as_object()?.payload() {
            NativePayload::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value of an Integer or Double.
    pub fn as_double(&self) -> Option<f64> {
        match &*self.as_object()?.payload() {
            NativePayload::Double(v) => Some(*v),
            NativePayload::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match &*self.as_object()?.payload() {
            NativePayload::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match &*self.as_object()?.payload() {
            NativePayload::String(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Whether both values hold the same instance.
    pub fn same_ref(&self, other: &Value<'_>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Rc::as_ptr(a) as *const u8, Rc::as_ptr(b) as *const u8)
            }
            _ => false,
        }
    }

    /// `==` semantics: scalars and collections by content, script objects
    /// by reference.
    pub fn equals(&self, other: &Value<'_>) -> bool {
        self.equals_within(other, 0)
    }

    fn equals_within(&self, other: &Value<'_>, depth: usize) -> bool {
        if self.same_ref(other) {
            return true;
        }
        if depth >= MAX_NESTING {
            return false;
        }
        let (Some(a), Some(b)) = (self.as_object(), other.as_object()) else {
            return false;
        };
        let (a, b) = (a.payload(), b.payload());
        match (&*a, &*b) {
            (NativePayload::Integer(x), NativePayload::Integer(y)) => x == y,
            (NativePayload::Integer(x), NativePayload::Double(y)) => (*x as f64) == *y,
            (NativePayload::Double(x), NativePayload::Integer(y)) => *x == (*y as f64),
            (NativePayload::Double(x), NativePayload::Double(y)) => x == y,
            (NativePayload::Boolean(x), NativePayload::Boolean(y)) => x == y,
            (NativePayload::String(x), NativePayload::String(y)) => x == y,
            (NativePayload::Date(x), NativePayload::Date(y)) => x == y,
            (NativePayload::List(x), NativePayload::List(y)) => {
                x.len() == y.len() && x.iter().zip(y).all(|(l, r)| l.equals_within(r, depth + 1))
            }
            (NativePayload::Map(x), NativePayload::Map(y)) => {
                x.len() == y.len()
                    && x.iter().all(|(key, (_, l))| {
                        y.get(key).is_some_and(|(_, r)| l.equals_within(r, depth + 1))
                    })
            }
            _ => false,
        }
    }
}

impl<'ast> From<Object<'ast>> for Value<'ast> {
    fn from(object: Object<'ast>) -> Self {
        Value::from_object(object)
    }
}

impl<'ast> From<Rc<Object<'ast>>> for Value<'ast> {
    fn from(object: Rc<Object<'ast>>) -> Self {
        Value::Object(object)
    }
}

/// Display form used by `System.debug` and string concatenation.
impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Nested { value: self, depth: 0 }, f)
    }
}

/// A value displayed `depth` collections deep.
struct Nested<'v, 'ast> {
    value: &'v Value<'ast>,
    depth: usize,
}

impl fmt::Display for Nested<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => f.write_str("null"),
            Value::Object(object) => object.write_nested(f, self.depth),
        }
    }
}

/// An instance of a class.
pub struct Object<'ast> {
    class: Rc<ClassDescriptor<'ast>>,
    type_args: Vec<DataType>,
    fields: RefCell<ValueTable<'ast>>,
    payload: RefCell<NativePayload<'ast>>,
}

impl<'ast> Object<'ast> {
    pub fn new(class: Rc<ClassDescriptor<'ast>>, type_args: Vec<DataType>) -> Self {
        Self::with_payload(class, type_args, NativePayload::None)
    }

    pub fn with_payload(
        class: Rc<ClassDescriptor<'ast>>,
        type_args: Vec<DataType>,
        payload: NativePayload<'ast>,
    ) -> Self {
        Self {
            class,
            type_args,
            fields: RefCell::new(ValueTable::new()),
            payload: RefCell::new(payload),
        }
    }

    pub fn class(&self) -> &Rc<ClassDescriptor<'ast>> {
        &self.class
    }

    pub fn type_args(&self) -> &[DataType] {
        &self.type_args
    }

    pub fn data_type(&self) -> DataType {
        if self.type_args.is_empty() {
            DataType::simple(self.class.name.clone())
        } else {
            DataType::generic(self.class.name.clone(), self.type_args.clone())
        }
    }

    // ------------------------------------------------------------------
    // Fields
    // ------------------------------------------------------------------

    pub fn get_field(&self, name: &str) -> Option<Value<'ast>> {
        self.fields.borrow().get(name).cloned()
    }

    pub fn set_field(&self, name: &str, value: Value<'ast>) {
        self.fields.borrow_mut().insert(name, value);
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.borrow().contains(name)
    }

    pub fn fields(&self) -> Ref<'_, ValueTable<'ast>> {
        self.fields.borrow()
    }

    // ------------------------------------------------------------------
    // Native payload
    // ------------------------------------------------------------------

    pub fn payload(&self) -> Ref<'_, NativePayload<'ast>> {
        self.payload.borrow()
    }

    pub fn payload_mut(&self) -> RefMut<'_, NativePayload<'ast>> {
        self.payload.borrow_mut()
    }

    pub fn set_payload(&self, payload: NativePayload<'ast>) {
        *self.payload.borrow_mut() = payload;
    }

    pub fn payload_mismatch(&self, expected: &'static str) -> NativeError {
        NativeError::PayloadMismatch {
            expected,
            class: self.class.name.clone(),
        }
    }

    pub fn list(&self) -> Result<Ref<'_, Vec<Value<'ast>>>, NativeError> {
        Ref::filter_map(self.payload.borrow(), |p| match p {
            NativePayload::List(items) => Some(items),
            _ => None,
        })
        .map_err(|_| self.payload_mismatch("List"))
    }

    pub fn list_mut(&self) -> Result<RefMut<'_, Vec<Value<'ast>>>, NativeError> {
        RefMut::filter_map(self.payload.borrow_mut(), |p| match p {
            NativePayload::List(items) => Some(items),
            _ => None,
        })
        .map_err(|_| self.payload_mismatch("List"))
    }

    #[allow(clippy::type_complexity)]
    pub fn map(&self) -> Result<Ref<'_, BTreeMap<MapKey, (Value<'ast>, Value<'ast>)>>, NativeError> {
        Ref::filter_map(self.payload.borrow(), |p| match p {
            NativePayload::Map(entries) => Some(entries),
            _ => None,
        })
        .map_err(|_| self.payload_mismatch("Map"))
    }

    #[allow(clippy::type_complexity)]
    pub fn map_mut(
        &self,
    ) -> Result<RefMut<'_, BTreeMap<MapKey, (Value<'ast>, Value<'ast>)>>, NativeError> {
        RefMut::filter_map(self.payload.borrow_mut(), |p| match p {
            NativePayload::Map(entries) => Some(entries),
            _ => None,
        })
        .map_err(|_| self.payload_mismatch("Map"))
    }
}

impl fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class.name)
            .field("type_args", &self.type_args)
            .field("payload", &self.payload.borrow().kind())
            .finish_non_exhaustive()
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_nested(f, 0)
    }
}

impl Object<'_> {
    fn write_nested(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth >= MAX_NESTING {
            return f.write_str("...");
        }
        let depth = depth + 1;
        match &*self.payload.borrow() {
            NativePayload::Integer(v) => write!(f, "{v}"),
            NativePayload::Double(v) => write!(f, "{v:?}"),
            NativePayload::Boolean(v) => write!(f, "{v}"),
            NativePayload::String(v) => f.write_str(v),
            NativePayload::List(items) => {
                f.write_str("(")?;
                write_joined(f, items.iter().map(|value| Nested { value, depth }))?;
                f.write_str(")")
            }
            NativePayload::Map(entries) => {
                f.write_str("{")?;
                write_joined(
                    f,
                    entries
                        .values()
                        .map(|(key, value)| format!("{key}={}", Nested { value, depth })),
                )?;
                f.write_str("}")
            }
            NativePayload::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            NativePayload::HttpRequest(request) => write!(
                f,
                "System.HttpRequest[Endpoint={}, Method={}]",
                request.endpoint.as_deref().unwrap_or("null"),
                request.method.as_deref().unwrap_or("null"),
            ),
            NativePayload::None => {
                write!(f, "{}:{{", self.class.name)?;
                write_joined(
                    f,
                    self.fields
                        .borrow()
                        .iter()
                        .map(|(name, value)| format!("{name}={}", Nested { value, depth })),
                )?;
                f.write_str("}")
            }
        }
    }
}
