//! `List<T>`.

use talon_core::{DataType, Modifiers, NativeError, primitives as names};

use crate::create_class;
use crate::entries::{ClassDescriptor, MethodDescriptor};
use crate::runtime::{CallContext, NativePayload, NativeResult};

fn element() -> DataType {
    DataType::simple("T")
}

pub(super) fn list_class<'ast>() -> ClassDescriptor<'ast> {
    let mut class =
        create_class(names::LIST, Modifiers::PUBLIC | Modifiers::GLOBAL).with_type_params(&["T"]);
    class.add_constructor(MethodDescriptor::native(names::LIST, None, vec![], construct));

    class.add_method(MethodDescriptor::native("add", None, vec![element()], add));
    class.add_method(MethodDescriptor::native(
        "get",
        Some(element()),
        vec![DataType::integer()],
        get,
    ));
    class.add_method(MethodDescriptor::native(
        "set",
        None,
        vec![DataType::integer(), element()],
        set,
    ));
    class.add_method(MethodDescriptor::native(
        "size",
        Some(DataType::integer()),
        vec![],
        size,
    ));
    class.add_method(MethodDescriptor::native(
        "isEmpty",
        Some(DataType::boolean()),
        vec![],
        is_empty,
    ));
    class.add_method(MethodDescriptor::native("clear", None, vec![], clear));
    class.add_method(MethodDescriptor::native(
        "contains",
        Some(DataType::boolean()),
        vec![element()],
        contains,
    ));
    class
}

fn construct<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    ctx.receiver()?.set_payload(NativePayload::List(Vec::new()));
    Ok(None)
}

fn add<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let value = ctx.arg(0)?.clone();
    ctx.receiver()?.list_mut()?.push(value);
    Ok(None)
}

/// Convert a script index into a position inside `len` elements.
pub fn checked_index(index: i64, len: usize) -> Result<usize, NativeError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(NativeError::IndexOutOfBounds { index, len })
}

fn get<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let index = ctx.integer_arg(0)?;
    let items = ctx.receiver()?.list()?;
    let slot = checked_index(index, items.len())?;
    Ok(Some(items[slot].clone()))
}

fn set<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let index = ctx.integer_arg(0)?;
    let value = ctx.arg(1)?.clone();
    let mut items = ctx.receiver()?.list_mut()?;
    let slot = checked_index(index, items.len())?;
    items[slot] = value;
    Ok(None)
}

fn size<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let len = ctx.receiver()?.list()?.len();
    Ok(Some(ctx.integer(len as i64)))
}

fn is_empty<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let empty = ctx.receiver()?.list()?.is_empty();
    Ok(Some(ctx.boolean(empty)))
}

fn clear<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    ctx.receiver()?.list_mut()?.clear();
    Ok(None)
}

fn contains<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let needle = ctx.arg(0)?;
    let found = ctx.receiver()?.list()?.iter().any(|item| item.equals(needle));
    Ok(Some(ctx.boolean(found)))
}
