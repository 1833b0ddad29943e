//! Overload resolution for method and constructor calls.
//!
//! ## Algorithm
//!
//! 1. Keep the candidates whose parameter count equals the argument count
//! 2. Pick the first of those whose parameter types equal the argument
//!    types position by position
//! 3. Otherwise pick the first whose parameters accept the arguments
//! 4. Otherwise fall back to the first arity match, or to the first
//!    declared candidate when no arity matches
//!
//! An unknown argument type or an unbound generic parameter counts as
//! equal. A parameter accepts an argument that is assignable to it (see
//! [`crate::conversion::is_assignable`]).
//!
//! The fallback keeps calls with mismatched arguments resolvable; callers
//! see [`MatchKind::Fallback`] and decide whether to report it.

mod bindings;

pub use bindings::TypeBindings;

use std::rc::Rc;

use talon_core::DataType;
use talon_registry::{ClassTable, MethodDescriptor};

use crate::conversion::is_assignable;

/// How a candidate was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Every parameter type equals its argument type.
    Exact,
    /// Every parameter accepts its argument.
    Compatible,
    /// Selected by the fallback rule.
    Fallback,
}

/// Result of overload resolution.
#[derive(Debug, Clone)]
pub struct OverloadMatch<'m, 'ast> {
    pub method: &'m Rc<MethodDescriptor<'ast>>,
    pub kind: MatchKind,
}

impl OverloadMatch<'_, '_> {
    pub fn is_exact(&self) -> bool {
        self.kind == MatchKind::Exact
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == MatchKind::Fallback
    }

    /// Whether the selected method takes `count` arguments.
    pub fn accepts_arity(&self, count: usize) -> bool {
        self.method.arity() == count
    }
}

/// Whether a parameter accepts an argument of type `arg` (`None` = unknown).
pub fn argument_matches(
    param: &DataType,
    arg: Option<&DataType>,
    bindings: &TypeBindings,
    classes: &ClassTable<'_>,
) -> bool {
    let Some(arg) = arg else {
        return true;
    };
    let param = bindings.substitute(param);
    bindings.is_unbound(&param) || is_assignable(arg, &param, classes)
}

/// Whether a parameter's type equals an argument of type `arg`.
fn argument_equals(param: &DataType, arg: Option<&DataType>, bindings: &TypeBindings) -> bool {
    let Some(arg) = arg else {
        return true;
    };
    let param = bindings.substitute(param);
    bindings.is_unbound(&param) || *arg == param
}

/// Select the overload for a call. Returns `None` only when there are no
/// candidates.
pub fn resolve_overload<'m, 'ast>(
    candidates: &'m [Rc<MethodDescriptor<'ast>>],
    arg_types: &[Option<DataType>],
    bindings: &TypeBindings,
    classes: &ClassTable<'ast>,
) -> Option<OverloadMatch<'m, 'ast>> {
    let first = candidates.first()?;

    let same_arity: Vec<&'m Rc<MethodDescriptor<'ast>>> = candidates
        .iter()
        .filter(|m| m.arity() == arg_types.len())
        .collect();

    let exact = same_arity.iter().copied().find(|m| {
        m.param_types()
            .zip(arg_types)
            .all(|(param, arg)| argument_equals(param, arg.as_ref(), bindings))
    });
    if let Some(method) = exact {
        return Some(OverloadMatch {
            method,
            kind: MatchKind::Exact,
        });
    }

    let compatible = same_arity.iter().copied().find(|m| {
        m.param_types()
            .zip(arg_types)
            .all(|(param, arg)| argument_matches(param, arg.as_ref(), bindings, classes))
    });
    Some(match compatible {
        Some(method) => OverloadMatch {
            method,
            kind: MatchKind::Compatible,
        },
        None => OverloadMatch {
            method: same_arity.first().copied().unwrap_or(first),
            kind: MatchKind::Fallback,
        },
    })
}
