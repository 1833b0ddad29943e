//! Type names as seen by the checker and the interpreter.
//!
//! A [`DataType`] is a class name plus generic arguments (`List<Integer>`).
//! Class names are case-insensitive, so equality ignores ASCII case.

use std::fmt;

/// Names of the classes the core itself relies on.
pub mod primitives {
    pub const INTEGER: &str = "Integer";
    pub const DOUBLE: &str = "Double";
    pub const STRING: &str = "String";
    pub const BOOLEAN: &str = "Boolean";
    pub const OBJECT: &str = "Object";
    pub const LIST: &str = "List";
    pub const MAP: &str = "Map";
    /// Pseudo type of a method without a return type.
    pub const VOID: &str = "void";
    /// Pseudo type of the `null` literal.
    pub const NULL: &str = "null";
}

/// A (possibly generic) class type.
#[derive(Debug, Clone, Eq)]
pub struct DataType {
    name: String,
    args: Vec<DataType>,
}

impl DataType {
    /// A non-generic type.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A generic type with type arguments.
    pub fn generic(name: impl Into<String>, args: Vec<DataType>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn integer() -> Self {
        Self::simple(primitives::INTEGER)
    }

    pub fn double() -> Self {
        Self::simple(primitives::DOUBLE)
    }

    pub fn string() -> Self {
        Self::simple(primitives::STRING)
    }

    pub fn boolean() -> Self {
        Self::simple(primitives::BOOLEAN)
    }

    pub fn void() -> Self {
        Self::simple(primitives::VOID)
    }

    pub fn null() -> Self {
        Self::simple(primitives::NULL)
    }

    pub fn list_of(element: DataType) -> Self {
        Self::generic(primitives::LIST, vec![element])
    }

    pub fn map_of(key: DataType, value: DataType) -> Self {
        Self::generic(primitives::MAP, vec![key, value])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[DataType] {
        &self.args
    }

    /// Whether this type's class name is `name` (ignoring case and arguments).
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_integer(&self) -> bool {
        self.is(primitives::INTEGER)
    }

    pub fn is_double(&self) -> bool {
        self.is(primitives::DOUBLE)
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_double()
    }

    pub fn is_string(&self) -> bool {
        self.is(primitives::STRING)
    }

    pub fn is_boolean(&self) -> bool {
        self.is(primitives::BOOLEAN)
    }

    pub fn is_void(&self) -> bool {
        self.is(primitives::VOID)
    }

    pub fn is_null(&self) -> bool {
        self.is(primitives::NULL)
    }

    pub fn is_list(&self) -> bool {
        self.is(primitives::LIST)
    }

    pub fn is_map(&self) -> bool {
        self.is(primitives::MAP)
    }

    /// `Object` accepts any argument during overload matching.
    pub fn is_object(&self) -> bool {
        self.is(primitives::OBJECT)
    }
}

impl PartialEq for DataType {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name) && self.args == other.args
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}
