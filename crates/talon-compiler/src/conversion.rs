//! Type compatibility between static types.
//!
//! There is no implicit conversion: `Integer` never widens to `Double`.
//! Declarations, assignments and returns need [`fits_exactly`]: equal
//! types, or a `null` value. Call arguments use the looser
//! [`is_assignable`], which also lets an `Object` parameter take any value
//! and a base-class parameter take a subclass instance.

use talon_core::DataType;
use talon_registry::ClassTable;

/// Whether a value of type `value` may be stored in a variable, field or
/// return slot declared as `target`.
pub fn fits_exactly(value: &DataType, target: &DataType) -> bool {
    value.is_null() || value == target
}

/// Whether an argument of type `value` may be passed for a parameter of
/// type `target`.
pub fn is_assignable(value: &DataType, target: &DataType, classes: &ClassTable<'_>) -> bool {
    if fits_exactly(value, target) || target.is_object() {
        return true;
    }
    if !target.args().is_empty() || !value.args().is_empty() {
        return false;
    }
    classes
        .resolve(value.name())
        .is_some_and(|class| class.is_subclass_of(target.name(), classes))
}
