//! Integer, Double, String, Boolean and Object.

use talon_core::{DataType, Modifiers, NativeError, primitives as names};

use crate::create_class;
use crate::entries::{ClassDescriptor, MethodDescriptor};
use crate::runtime::{CallContext, NativePayload, NativeResult};

fn scalar_class<'ast>(name: &str) -> ClassDescriptor<'ast> {
    create_class(name, Modifiers::PUBLIC | Modifiers::GLOBAL)
}

pub(super) fn integer_class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = scalar_class(names::INTEGER);
    class.add_method(MethodDescriptor::native(
        "format",
        Some(DataType::string()),
        vec![],
        format_scalar,
    ));
    class.add_method(MethodDescriptor::native_static(
        "valueOf",
        Some(DataType::integer()),
        vec![DataType::string()],
        integer_value_of,
    ));
    class
}

pub(super) fn double_class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = scalar_class(names::DOUBLE);
    class.add_method(MethodDescriptor::native(
        "format",
        Some(DataType::string()),
        vec![],
        format_scalar,
    ));
    class.add_method(MethodDescriptor::native(
        "intValue",
        Some(DataType::integer()),
        vec![],
        double_int_value,
    ));
    class
}

pub(super) fn string_class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = scalar_class(names::STRING);
    class.add_method(MethodDescriptor::native(
        "length",
        Some(DataType::integer()),
        vec![],
        string_length,
    ));
    class.add_method(MethodDescriptor::native(
        "toUpperCase",
        Some(DataType::string()),
        vec![],
        string_to_upper,
    ));
    class.add_method(MethodDescriptor::native(
        "toLowerCase",
        Some(DataType::string()),
        vec![],
        string_to_lower,
    ));
    class.add_method(MethodDescriptor::native(
        "contains",
        Some(DataType::boolean()),
        vec![DataType::string()],
        string_contains,
    ));
    class.add_method(MethodDescriptor::native_static(
        "valueOf",
        Some(DataType::string()),
        vec![DataType::simple(names::OBJECT)],
        string_value_of,
    ));
    class
}

pub(super) fn boolean_class<'ast>() -> ClassDescriptor<'ast> {
    scalar_class(names::BOOLEAN)
}

pub(super) fn object_class<'ast>() -> ClassDescriptor<'ast> {
    scalar_class(names::OBJECT)
}

fn format_scalar<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let text = ctx.receiver()?.to_string();
    Ok(Some(ctx.string(text)))
}

fn integer_value_of<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let text = ctx.string_arg(0)?;
    let value = text.trim().parse::<i64>().map_err(|_| NativeError::ArgumentType {
        index: 0,
        expected: "an integer literal",
    })?;
    Ok(Some(ctx.integer(value)))
}

fn double_int_value<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let receiver = ctx.receiver()?;
    let value = match &*receiver.payload() {
        NativePayload::Double(v) => *v,
        _ => return Err(receiver.payload_mismatch("Double")),
    };
    Ok(Some(ctx.integer(value.trunc() as i64)))
}

fn receiver_string(ctx: &CallContext<'_, '_>) -> Result<String, NativeError> {
    let receiver = ctx.receiver()?;
    match &*receiver.payload() {
        NativePayload::String(s) => Ok(s.clone()),
        _ => Err(receiver.payload_mismatch("String")),
    }
}

fn string_length<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let len = receiver_string(ctx)?.chars().count();
    Ok(Some(ctx.integer(len as i64)))
}

fn string_to_upper<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let upper = receiver_string(ctx)?.to_uppercase();
    Ok(Some(ctx.string(upper)))
}

fn string_to_lower<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let lower = receiver_string(ctx)?.to_lowercase();
    Ok(Some(ctx.string(lower)))
}

fn string_contains<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let haystack = receiver_string(ctx)?;
    let needle = ctx.string_arg(0)?;
    Ok(Some(ctx.boolean(haystack.contains(&needle))))
}

fn string_value_of<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let text = ctx.arg(0)?.to_string();
    Ok(Some(ctx.string(text)))
}
