//! The boundary between the interpreter and native methods.

use std::io::Write;
use std::rc::Rc;

use talon_core::{DataType, NativeError};

use super::{Object, QueryCredentials, QueryExecutor, Value};
use crate::builtins::Primitives;
use crate::entries::ClassTable;

/// What a native method produces: a value, nothing (`void`), or an error.
pub type NativeResult<'ast> = Result<Option<Value<'ast>>, NativeError>;

/// A host function implementing a method.
pub type NativeFn<'ast> = fn(&mut CallContext<'_, 'ast>) -> NativeResult<'ast>;

/// Host services available to native methods.
pub struct Extras<'c> {
    /// Program output sink
    pub out: &'c mut dyn Write,
    /// Query service, when the host configured one
    pub query: Option<&'c dyn QueryExecutor>,
    pub credentials: &'c QueryCredentials,
}

/// Everything a native method sees for one invocation.
///
/// ```ignore
/// fn size<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
///     let len = ctx.receiver()?.list()?.len();
///     Ok(Some(ctx.integer(len as i64)))
/// }
/// ```
pub struct CallContext<'c, 'ast> {
    receiver: Option<Rc<Object<'ast>>>,
    args: Vec<Value<'ast>>,
    classes: &'c ClassTable<'ast>,
    prims: &'c Primitives<'ast>,
    extras: Extras<'c>,
}

impl<'c, 'ast> CallContext<'c, 'ast> {
    pub fn new(
        receiver: Option<Rc<Object<'ast>>>,
        args: Vec<Value<'ast>>,
        classes: &'c ClassTable<'ast>,
        prims: &'c Primitives<'ast>,
        extras: Extras<'c>,
    ) -> Self {
        Self {
            receiver,
            args,
            classes,
            prims,
            extras,
        }
    }

    /// The instance the method was invoked on.
    pub fn receiver(&self) -> Result<&Rc<Object<'ast>>, NativeError> {
        self.receiver.as_ref().ok_or(NativeError::MissingReceiver)
    }

    /// Generic argument `index` of the receiver, `Object` when unbound.
    pub fn receiver_type_arg(&self, index: usize) -> DataType {
        self.receiver
            .as_ref()
            .and_then(|r| r.type_args().get(index).cloned())
            .unwrap_or_else(|| DataType::simple(talon_core::primitives::OBJECT))
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn args(&self) -> &[Value<'ast>] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Result<&Value<'ast>, NativeError> {
        self.args
            .get(index)
            .ok_or(NativeError::ArgumentIndexOutOfBounds {
                index,
                count: self.args.len(),
            })
    }

    pub fn integer_arg(&self, index: usize) -> Result<i64, NativeError> {
        self.arg(index)?
            .as_integer()
            .ok_or(NativeError::ArgumentType {
                index,
                expected: "Integer",
            })
    }

    pub fn string_arg(&self, index: usize) -> Result<String, NativeError> {
        self.arg(index)?
            .as_string()
            .ok_or(NativeError::ArgumentType {
                index,
                expected: "String",
            })
    }

    pub fn classes(&self) -> &'c ClassTable<'ast> {
        self.classes
    }

    pub fn prims(&self) -> &'c Primitives<'ast> {
        self.prims
    }

    /// Write `text` and a newline to the program output.
    pub fn write_line(&mut self, text: &str) -> Result<(), NativeError> {
        writeln!(self.extras.out, "{text}").map_err(|e| NativeError::Output {
            message: e.to_string(),
        })
    }

    pub fn query_executor(&self) -> Option<&'c dyn QueryExecutor> {
        self.extras.query
    }

    pub fn credentials(&self) -> &'c QueryCredentials {
        self.extras.credentials
    }

    /// A fresh instance of a registered class with an empty payload.
    pub fn new_object(
        &self,
        class_name: &str,
        type_args: Vec<DataType>,
    ) -> Result<Rc<Object<'ast>>, NativeError> {
        let class = self
            .classes
            .resolve(class_name)
            .ok_or_else(|| NativeError::UnknownClass {
                name: class_name.to_string(),
            })?;
        Ok(Rc::new(Object::new(Rc::clone(class), type_args)))
    }

    pub fn integer(&self, value: i64) -> Value<'ast> {
        self.prims.integer(value)
    }

    pub fn double(&self, value: f64) -> Value<'ast> {
        self.prims.double(value)
    }

    pub fn string(&self, value: impl Into<String>) -> Value<'ast> {
        self.prims.string(value)
    }

    pub fn boolean(&self, value: bool) -> Value<'ast> {
        self.prims.boolean(value)
    }
}
