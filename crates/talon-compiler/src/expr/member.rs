//! Field access, receivers and indexing.

use std::rc::Rc;

use talon_ast::{Expr, Ident, IndexExpr, MemberExpr};
use talon_core::{CompilationError, DataType};
use talon_registry::ClassDescriptor;

use super::identifiers::lookup_value;
use crate::checker::MethodChecker;

/// What the left side of `a.b` or `a.b()` denotes.
pub(crate) enum Receiver<'a, 'ast> {
    /// A class name; members are static.
    Class(&'a Rc<ClassDescriptor<'ast>>),
    /// `this`
    This,
    /// A value of a known type.
    Value(DataType),
    /// A value whose type is unknown (already reported).
    Unknown,
}

/// Classify the left side of a member access or call.
pub(crate) fn receiver<'a, 'ast>(
    checker: &mut MethodChecker<'_, 'a, 'ast>,
    expr: &Expr<'ast>,
) -> Receiver<'a, 'ast> {
    match expr {
        Expr::This(span) => {
            if checker.is_static {
                checker.error(CompilationError::static_context("this", *span));
                return Receiver::Unknown;
            }
            Receiver::This
        }
        Expr::Ident(ident) => {
            if let Some(ty) = lookup_value(checker, ident) {
                return ty.map_or(Receiver::Unknown, Receiver::Value);
            }
            if let Some(class) = checker.ctx.lookup_class(ident.name) {
                return Receiver::Class(class);
            }
            checker.error(CompilationError::undefined("variable", ident.name, ident.span));
            Receiver::Unknown
        }
        Expr::Member(member) => {
            let outer = receiver(checker, member.object);
            if let Receiver::Class(class) = outer
                && let Some(inner) = class.inner_classes.get(member.member.name)
            {
                return Receiver::Class(inner);
            }
            member_on(checker, outer, &member.member)
                .map_or(Receiver::Unknown, Receiver::Value)
        }
        _ => checker
            .infer(expr)
            .map_or(Receiver::Unknown, Receiver::Value),
    }
}

/// Type of `object.member`.
pub fn check_member<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    member: &MemberExpr<'ast>,
) -> Option<DataType> {
    let outer = receiver(checker, member.object);
    member_on(checker, outer, &member.member)
}

fn member_on<'a, 'ast>(
    checker: &mut MethodChecker<'_, 'a, 'ast>,
    receiver: Receiver<'a, 'ast>,
    member: &Ident<'ast>,
) -> Option<DataType> {
    let classes = checker.classes();
    let name = member.name;
    match receiver {
        Receiver::Class(class) => {
            if let Some((_, field)) = class.find_static_field(name, classes) {
                return Some(field.data_type.clone());
            }
            if class.find_instance_field(name, classes).is_some() {
                checker.error(CompilationError::static_context(name, member.span));
                return None;
            }
            undefined_field(checker, member)
        }
        Receiver::This => {
            let class = checker.ctx.class();
            match class.find_instance_field(name, classes) {
                Some(field) => Some(field.data_type.clone()),
                None => undefined_field(checker, member),
            }
        }
        Receiver::Value(ty) => {
            let class = checker.ctx.lookup_class(ty.name())?;
            if let Some(field) = class.find_instance_field(name, classes) {
                return Some(field.data_type.clone());
            }
            match class.find_static_field(name, classes) {
                Some((_, field)) => Some(field.data_type.clone()),
                None => undefined_field(checker, member),
            }
        }
        Receiver::Unknown => None,
    }
}

fn undefined_field(checker: &mut MethodChecker<'_, '_, '_>, member: &Ident<'_>) -> Option<DataType> {
    checker.error(CompilationError::undefined("field", member.name, member.span));
    None
}

/// Type of `object[index]`.
///
/// Map receivers take String keys and yield the value type. Every other
/// receiver takes Integer (or String) keys; only Lists yield an element.
pub fn check_index<'ast>(
    checker: &mut MethodChecker<'_, '_, 'ast>,
    index: &IndexExpr<'ast>,
) -> Option<DataType> {
    let object = checker.infer(index.object);
    let key = checker.infer(index.index);
    let key_span = index.index.span();

    if let Some(object) = object.as_ref().filter(|ty| ty.is_map()) {
        if let Some(key) = &key
            && !key.is_string()
        {
            checker.error(CompilationError::map_key(key, key_span));
            return None;
        }
        return object.args().get(1).cloned();
    }

    if let Some(key) = &key
        && !(key.is_integer() || key.is_string())
    {
        checker.error(CompilationError::list_key(key, key_span));
        return None;
    }

    let object = object?;
    if object.is_list() {
        return object.args().first().cloned();
    }
    checker.error(CompilationError::not_indexable(&object, index.span));
    None
}
