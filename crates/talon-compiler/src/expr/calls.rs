//! Method calls and object creation.
//!
//! Call resolution:
//! - no receiver: methods of the enclosing class (instance, then static)
//! - `this`: instance methods of the enclosing class
//! - a class name: static methods of that class
//! - any other value: instance methods of the value's class, with the
//!   value's generic arguments bound to the class's type parameters
//!
//! Calls through an explicit receiver (anything but `this` or the
//! enclosing class's own name) must not reach private or protected
//! methods.

use std::rc::Rc;

use log::warn;
use talon_ast::{CallExpr, Expr, NewExpr};
use talon_core::{CompilationError, DataType, Span};
use talon_registry::MethodDescriptor;

use super::member::{Receiver, receiver};
use crate::checker::MethodChecker;
use crate::overload::{TypeBindings, resolve_overload};

/// The overload group a call resolves against.
struct CallTarget<'a, 'ast> {
    group: Option<&'a [Rc<MethodDescriptor<'ast>>]>,
    bindings: TypeBindings,
    external: bool,
}

/// Type of a method call: the selected overload's return type.
pub fn check_call<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    call: &CallExpr<'ast>,
) -> Option<DataType> {
    let name = call.method.name;
    let target = match call.receiver {
        None => implicit_target(checker, name, call.span),
        Some(expr) => explicit_target(checker, expr, name),
    };
    let arg_types = infer_args(checker, call.args);
    let target = target?;

    let Some(group) = target.group else {
        checker.error(CompilationError::undefined("method", name, call.method.span));
        return None;
    };
    let method = select(checker, name, group, &arg_types, &target.bindings, call.span)?;

    let visibility = method.visibility();
    if target.external && !visibility.is_externally_callable() {
        checker.error(CompilationError::method_not_public(visibility, call.span));
        return None;
    }

    let ret = target.bindings.substitute(&method.return_type_or_void());
    if target.bindings.is_unbound(&ret) {
        return None;
    }
    Some(ret)
}

fn implicit_target<'a, 'ast>(
    checker: &mut MethodChecker<'_, 'a, 'ast>,
    name: &str,
    span: Span,
) -> Option<CallTarget<'a, 'ast>> {
    let class = checker.ctx.class();
    let classes = checker.classes();
    let instance = class.find_instance_methods(name, classes);
    let statics = class.find_static_methods(name, classes);

    let group = if checker.is_static {
        if statics.is_none() && instance.is_some() {
            checker.error(CompilationError::static_context(name, span));
            return None;
        }
        statics
    } else {
        instance.or(statics)
    };
    Some(CallTarget {
        group,
        bindings: TypeBindings::none(),
        external: false,
    })
}

fn explicit_target<'a, 'ast>(
    checker: &mut MethodChecker<'_, 'a, 'ast>,
    expr: &Expr<'ast>,
    name: &str,
) -> Option<CallTarget<'a, 'ast>> {
    let classes = checker.classes();
    let target = match receiver(checker, expr) {
        Receiver::This => CallTarget {
            group: checker.ctx.class().find_instance_methods(name, classes),
            bindings: TypeBindings::none(),
            external: false,
        },
        Receiver::Class(class) => CallTarget {
            group: class.find_static_methods(name, classes),
            bindings: TypeBindings::none(),
            external: !checker.ctx.is_current(class),
        },
        Receiver::Value(ty) => {
            let class = checker.ctx.lookup_class(ty.name())?;
            CallTarget {
                group: class.find_instance_methods(name, classes),
                bindings: TypeBindings::new(&class.type_params, ty.args()),
                external: true,
            }
        }
        Receiver::Unknown => return None,
    };
    Some(target)
}

fn infer_args<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    args: &[Expr<'ast>],
) -> Vec<Option<DataType>> {
    args.iter().map(|arg| checker.infer(arg)).collect()
}

/// Pick an overload, warning when the fallback rule decided and reporting
/// an argument-count mismatch.
fn select<'m, 'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    name: &str,
    group: &'m [Rc<MethodDescriptor<'ast>>],
    arg_types: &[Option<DataType>],
    bindings: &TypeBindings,
    span: Span,
) -> Option<&'m Rc<MethodDescriptor<'ast>>> {
    let selected = resolve_overload(group, arg_types, bindings, checker.classes())?;
    if selected.is_fallback() {
        warn!(
            "no overload of {name} matches the argument types at {span}; using the first candidate"
        );
        if !selected.accepts_arity(arg_types.len()) {
            checker.error(CompilationError::wrong_arity(
                name,
                selected.method.arity(),
                arg_types.len(),
                span,
            ));
        }
    }
    Some(selected.method)
}

/// Type of `new T(args)`.
pub fn check_new<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    new: &NewExpr<'ast>,
) -> Option<DataType> {
    let written = new.ty.to_data_type();
    let ty = checker.ctx.resolve_type(&written, new.ty.span);
    let arg_types = infer_args(checker, new.args);
    let ty = ty?;
    let class = checker.ctx.lookup_class(ty.name())?;

    if class.constructors.is_empty() {
        if !arg_types.is_empty() {
            checker.error(CompilationError::wrong_arity(
                &class.name,
                0,
                arg_types.len(),
                new.span,
            ));
        }
        return Some(ty);
    }

    let bindings = TypeBindings::new(&class.type_params, ty.args());
    let ctor = select(checker, &class.name, &class.constructors, &arg_types, &bindings, new.span)?;
    let visibility = ctor.visibility();
    if !visibility.is_externally_callable() && !checker.ctx.is_current(class) {
        checker.error(CompilationError::method_not_public(visibility, new.span));
    }
    Some(ty)
}
