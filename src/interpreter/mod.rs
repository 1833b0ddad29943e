//! Tree-walking interpreter.
//!
//! Walks the same AST the checker verified. Every expression evaluates to
//! a [`Value`]; every statement produces a [`Flow`] that carries
//! `return`, `break` and `continue` up to the construct that consumes it.
//!
//! ## Modules
//!
//! - [`call`]: method dispatch, overload selection and instantiation
//! - [`expr`]: expression evaluation
//! - [`flow`]: statement outcomes
//! - [`frame`]: activation records and block scopes
//! - [`ops`]: operator semantics on runtime values
//! - [`place`]: assignable locations
//! - [`stmt`]: statement execution
//!
//! Static field values live here rather than in the class descriptors.
//! They are created the first time their class is touched and dropped with
//! the interpreter, so every run starts from fresh statics.

mod call;
mod expr;
mod flow;
mod frame;
mod ops;
mod place;
mod stmt;

pub use flow::Flow;
pub use frame::Frame;

use std::io::Write;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;
use talon_core::RuntimeError;
use talon_registry::{
    ClassDescriptor, ClassTable, Primitives, QueryCredentials, QueryExecutor, Value, ValueTable,
};

/// Host services a run writes to and reads from.
pub struct RunHost<'r> {
    pub out: &'r mut dyn Write,
    pub query: Option<&'r dyn QueryExecutor>,
    pub credentials: &'r QueryCredentials,
}

/// Executes methods of a checked class table.
pub struct Interpreter<'r, 'ast> {
    classes: &'r ClassTable<'ast>,
    prims: Primitives<'ast>,
    host: RunHost<'r>,
    max_depth: usize,
    frames: Vec<Frame<'ast>>,
    /// Static field values keyed by the address of the declaring class
    statics: FxHashMap<usize, ValueTable<'ast>>,
}

/// Identity of a class descriptor for the lifetime of a run.
#[inline]
fn class_key(class: &ClassDescriptor<'_>) -> usize {
    std::ptr::from_ref(class) as usize
}

impl<'r, 'ast> Interpreter<'r, 'ast> {
    pub fn new(
        classes: &'r ClassTable<'ast>,
        host: RunHost<'r>,
        max_depth: usize,
    ) -> Result<Self, RuntimeError> {
        Ok(Self {
            classes,
            prims: Primitives::resolve(classes)?,
            host,
            max_depth,
            frames: Vec::new(),
            statics: FxHashMap::default(),
        })
    }

    pub fn classes(&self) -> &'r ClassTable<'ast> {
        self.classes
    }

    /// Number of active method frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Run `class#method` with no arguments.
    ///
    /// A static method is called directly. Otherwise the class is
    /// instantiated with its no-argument constructor and the instance
    /// method is called on the new object.
    pub fn run_entry(
        &mut self,
        class_name: &str,
        method: &str,
    ) -> Result<Option<Value<'ast>>, RuntimeError> {
        let class = self
            .classes
            .resolve(class_name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedClass {
                name: class_name.to_string(),
            })?;
        debug!("running {}#{method}", class.name);

        if class.find_static_methods(method, self.classes).is_some() {
            return self.call_static(&class, method, Vec::new());
        }
        if class.find_instance_methods(method, self.classes).is_some() {
            let object = self.instantiate(&class, Vec::new(), Vec::new())?;
            return self.call_instance(object, method, Vec::new());
        }
        Err(RuntimeError::UndefinedMethod {
            class: class.name.clone(),
            name: method.to_string(),
        })
    }

    /// Flush the program output.
    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.host.out.flush()?;
        Ok(())
    }

    fn frame(&self) -> Result<&Frame<'ast>, RuntimeError> {
        self.frames.last().ok_or(RuntimeError::NoFrame)
    }

    fn frame_mut(&mut self) -> Result<&mut Frame<'ast>, RuntimeError> {
        self.frames.last_mut().ok_or(RuntimeError::NoFrame)
    }

    /// Find a class by name: inner classes of the running class first,
    /// then the class table.
    fn lookup_class(&self, name: &str) -> Option<Rc<ClassDescriptor<'ast>>> {
        self.frames
            .last()
            .and_then(|frame| frame.class.inner_classes.get(name).cloned())
            .or_else(|| self.classes.resolve(name).cloned())
    }

    /// Create the static fields of `class` and its superclasses that do
    /// not exist yet, then run their initializers.
    fn ensure_statics(&mut self, class: &Rc<ClassDescriptor<'ast>>) -> Result<(), RuntimeError> {
        let mut pending = Vec::new();
        for owner in class.chain(self.classes) {
            let key = class_key(owner);
            if self.statics.contains_key(&key) {
                continue;
            }
            let mut values = ValueTable::new();
            for (name, field) in owner.static_fields.iter() {
                values.insert(name, Value::Null);
                if let Some(init) = field.init {
                    pending.push((key, name.to_string(), init));
                }
            }
            self.statics.insert(key, values);
        }
        if pending.is_empty() {
            return Ok(());
        }

        debug!("initializing statics of {}", class.name);
        self.frames.push(Frame::new(Rc::clone(class), None));
        let result: Result<(), RuntimeError> = pending.into_iter().try_for_each(|(key, name, init)| {
            let value = self.eval(init)?;
            if let Some(values) = self.statics.get_mut(&key) {
                values.insert(name, value);
            }
            Ok(())
        });
        self.frames.pop();
        result
    }

    /// Read static `name` visible from `class`.
    fn static_value(
        &mut self,
        class: &Rc<ClassDescriptor<'ast>>,
        name: &str,
    ) -> Result<Option<Value<'ast>>, RuntimeError> {
        let Some((owner, _)) = class.find_static_field(name, self.classes) else {
            return Ok(None);
        };
        let key = class_key(owner);
        self.ensure_statics(class)?;
        Ok(self
            .statics
            .get(&key)
            .and_then(|values| values.get(name))
            .cloned()
            .or(Some(Value::Null)))
    }

    /// Write static `name` visible from `class`. Returns `false` when no
    /// class in the chain declares it.
    fn set_static(
        &mut self,
        class: &Rc<ClassDescriptor<'ast>>,
        name: &str,
        value: Value<'ast>,
    ) -> Result<bool, RuntimeError> {
        let Some((owner, _)) = class.find_static_field(name, self.classes) else {
            return Ok(false);
        };
        let key = class_key(owner);
        self.ensure_statics(class)?;
        if let Some(values) = self.statics.get_mut(&key) {
            values.insert(name, value);
        }
        Ok(true)
    }
}
