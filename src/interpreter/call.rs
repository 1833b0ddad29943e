//! Method dispatch and instantiation.
//!
//! Overloads are selected with the same rule the checker uses
//! ([`resolve_overload`]), fed with the runtime types of the evaluated
//! arguments. Instance methods are looked up on the receiver's runtime
//! class, so a subclass method hides a superclass method of the same
//! signature.

use std::rc::Rc;

use log::trace;
use talon_ast::{CallExpr, Expr, NewExpr};
use talon_compiler::{TypeBindings, resolve_overload};
use talon_core::{DataType, RuntimeError};
use talon_registry::{
    CallContext, ClassDescriptor, Extras, MethodBody, MethodDescriptor, Object, Value,
};

use super::{Flow, Frame, Interpreter};

/// Where a call goes.
enum CallTarget<'ast> {
    Static(Rc<ClassDescriptor<'ast>>),
    Instance(Rc<Object<'ast>>),
}

fn undefined_method(class: &ClassDescriptor<'_>, name: &str) -> RuntimeError {
    RuntimeError::UndefinedMethod {
        class: class.name.clone(),
        name: name.to_string(),
    }
}

impl<'r, 'ast> Interpreter<'r, 'ast> {
    pub(super) fn eval_args(&mut self, args: &[Expr<'ast>]) -> Result<Vec<Value<'ast>>, RuntimeError> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Evaluate a call. Void methods produce `null`.
    pub(super) fn eval_call(&mut self, call: &CallExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let name = call.method.name;
        let target = match call.receiver {
            None => self.implicit_target(name)?,
            Some(receiver) => match self.class_ref(receiver) {
                Some(class) => CallTarget::Static(class),
                None => match self.eval(receiver)? {
                    Value::Object(object) => CallTarget::Instance(object),
                    Value::Null => {
                        return Err(RuntimeError::NullReference {
                            span: receiver.span(),
                        });
                    }
                },
            },
        };
        let args = self.eval_args(call.args)?;
        let result = match target {
            CallTarget::Static(class) => self.call_static(&class, name, args)?,
            CallTarget::Instance(object) => self.call_instance(object, name, args)?,
        };
        Ok(result.unwrap_or_default())
    }

    /// A call without a receiver: an instance method on `this` when one
    /// exists, otherwise a static method of the running class.
    fn implicit_target(&self, name: &str) -> Result<CallTarget<'ast>, RuntimeError> {
        let frame = self.frame()?;
        match &frame.this {
            Some(this) if this.class().find_instance_methods(name, self.classes).is_some() => {
                Ok(CallTarget::Instance(Rc::clone(this)))
            }
            None if frame.class.find_static_methods(name, self.classes).is_none()
                && frame.class.find_instance_methods(name, self.classes).is_some() =>
            {
                Err(RuntimeError::StaticContext {
                    name: name.to_string(),
                })
            }
            _ => Ok(CallTarget::Static(Rc::clone(&frame.class))),
        }
    }

    /// Pick the overload of `group` matching the runtime types of `args`.
    fn select<'m>(
        &self,
        group: &'m [Rc<MethodDescriptor<'ast>>],
        args: &[Value<'ast>],
        bindings: &TypeBindings,
    ) -> Option<&'m Rc<MethodDescriptor<'ast>>> {
        let arg_types: Vec<Option<DataType>> =
            args.iter().map(|arg| Some(arg.data_type())).collect();
        resolve_overload(group, &arg_types, bindings, self.classes).map(|found| found.method)
    }

    pub(super) fn call_static(
        &mut self,
        class: &Rc<ClassDescriptor<'ast>>,
        name: &str,
        args: Vec<Value<'ast>>,
    ) -> Result<Option<Value<'ast>>, RuntimeError> {
        self.ensure_statics(class)?;
        let method = class
            .find_static_methods(name, self.classes)
            .and_then(|group| self.select(group, &args, &TypeBindings::none()))
            .cloned()
            .ok_or_else(|| undefined_method(class, name))?;
        self.invoke(&method, Rc::clone(class), None, args)
    }

    pub(super) fn call_instance(
        &mut self,
        object: Rc<Object<'ast>>,
        name: &str,
        args: Vec<Value<'ast>>,
    ) -> Result<Option<Value<'ast>>, RuntimeError> {
        let class = Rc::clone(object.class());
        let bindings = TypeBindings::new(&class.type_params, object.type_args());
        let method = class
            .find_instance_methods(name, self.classes)
            .and_then(|group| self.select(group, &args, &bindings))
            .cloned()
            .ok_or_else(|| undefined_method(&class, name))?;
        self.invoke(&method, class, Some(object), args)
    }

    /// Run `method` in `class` with the given receiver and arguments.
    pub(super) fn invoke(
        &mut self,
        method: &Rc<MethodDescriptor<'ast>>,
        class: Rc<ClassDescriptor<'ast>>,
        receiver: Option<Rc<Object<'ast>>>,
        args: Vec<Value<'ast>>,
    ) -> Result<Option<Value<'ast>>, RuntimeError> {
        trace!("dispatch {}.{} ({} args)", class.name, method.name, args.len());
        if self.frames.len() >= self.max_depth {
            return Err(RuntimeError::CallDepthExceeded {
                limit: self.max_depth,
            });
        }

        match method.body {
            MethodBody::Native(function) => {
                let mut ctx = CallContext::new(
                    receiver,
                    args,
                    self.classes,
                    &self.prims,
                    Extras {
                        out: &mut *self.host.out,
                        query: self.host.query,
                        credentials: self.host.credentials,
                    },
                );
                Ok(function(&mut ctx)?)
            }
            MethodBody::Script(body) => {
                if args.len() != method.arity() {
                    return Err(RuntimeError::ArgumentCount {
                        name: method.name.clone(),
                        expected: method.arity(),
                        got: args.len(),
                    });
                }
                let mut frame = Frame::new(class, receiver);
                for (param, value) in method.params.iter().zip(args) {
                    frame.declare(&param.name, value);
                }
                self.frames.push(frame);
                let flow = self.exec_stmts(body.stmts);
                self.frames.pop();
                match flow? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal | Flow::Break | Flow::Continue => Ok(None),
                }
            }
            MethodBody::Abstract => Err(undefined_method(&class, &method.name)),
        }
    }

    pub(super) fn eval_new(&mut self, new: &NewExpr<'ast>) -> Result<Value<'ast>, RuntimeError> {
        let ty = new.ty.to_data_type();
        let class = self
            .lookup_class(ty.name())
            .ok_or_else(|| RuntimeError::UndefinedClass {
                name: ty.name().to_string(),
            })?;
        let args = self.eval_args(new.args)?;
        let object = self.instantiate(&class, ty.args().to_vec(), args)?;
        Ok(Value::from(object))
    }

    /// Allocate an instance: every instance field starts as `null`, the
    /// initializers run base class first in declaration order, then the
    /// matching constructor runs if the class declares any.
    pub(super) fn instantiate(
        &mut self,
        class: &Rc<ClassDescriptor<'ast>>,
        type_args: Vec<DataType>,
        args: Vec<Value<'ast>>,
    ) -> Result<Rc<Object<'ast>>, RuntimeError> {
        self.ensure_statics(class)?;
        let object = Rc::new(Object::new(Rc::clone(class), type_args));

        let mut inits = Vec::new();
        for field in class.all_instance_fields(self.classes) {
            object.set_field(&field.name, Value::Null);
            if let Some(init) = field.init {
                inits.push((field.name.clone(), init));
            }
        }
        if !inits.is_empty() {
            self.frames
                .push(Frame::new(Rc::clone(class), Some(Rc::clone(&object))));
            let result: Result<(), RuntimeError> =
                inits.into_iter().try_for_each(|(name, init)| {
                    let value = self.eval(init)?;
                    object.set_field(&name, value);
                    Ok(())
                });
            self.frames.pop();
            result?;
        }

        if class.constructors.is_empty() {
            if !args.is_empty() {
                return Err(RuntimeError::ArgumentCount {
                    name: class.name.clone(),
                    expected: 0,
                    got: args.len(),
                });
            }
            return Ok(object);
        }
        let bindings = TypeBindings::new(&class.type_params, object.type_args());
        let ctor = self
            .select(&class.constructors, &args, &bindings)
            .cloned()
            .ok_or_else(|| undefined_method(class, &class.name))?;
        self.invoke(&ctor, Rc::clone(class), Some(Rc::clone(&object)), args)?;
        Ok(object)
    }
}
