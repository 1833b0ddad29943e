//! `Map<K, V>`.

use talon_core::{DataType, Modifiers, primitives as names};

use crate::create_class;
use crate::entries::{ClassDescriptor, MethodDescriptor};
use crate::runtime::{CallContext, MapKey, NativePayload, NativeResult, Value};

fn key() -> DataType {
    DataType::simple("K")
}

fn value() -> DataType {
    DataType::simple("V")
}

pub(super) fn map_class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class(names::MAP, Modifiers::PUBLIC | Modifiers::GLOBAL)
        .with_type_params(&["K", "V"]);
    class.add_constructor(MethodDescriptor::native(names::MAP, None, vec![], construct));

    class.add_method(MethodDescriptor::native(
        "put",
        Some(value()),
        vec![key(), value()],
        put,
    ));
    class.add_method(MethodDescriptor::native("get", Some(value()), vec![key()], get));
    class.add_method(MethodDescriptor::native(
        "containsKey",
        Some(DataType::boolean()),
        vec![key()],
        contains_key,
    ));
    class.add_method(MethodDescriptor::native(
        "remove",
        Some(value()),
        vec![key()],
        remove,
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
    class.add_method(MethodDescriptor::native(
        "keySet",
        Some(DataType::list_of(key())),
        vec![],
        key_set,
    ));
    class.add_method(MethodDescriptor::native(
        "values",
        Some(DataType::list_of(value())),
        vec![],
        values,
    ));
    class
}

fn construct<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    ctx.receiver()?
        .set_payload(NativePayload::Map(Default::default()));
    Ok(None)
}

/// Stores `value` under `key` and returns what was there before.
fn put<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let key_value = ctx.arg(0)?.clone();
    let value = ctx.arg(1)?.clone();
    let key = MapKey::from_value(&key_value)?;
    let previous = ctx.receiver()?.map_mut()?.insert(key, (key_value, value));
    Ok(Some(previous.map(|(_, v)| v).unwrap_or(Value::Null)))
}

fn get<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let key = MapKey::from_value(ctx.arg(0)?)?;
    let found = ctx.receiver()?.map()?.get(&key).map(|(_, v)| v.clone());
    Ok(Some(found.unwrap_or(Value::Null)))
}

fn contains_key<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let key = MapKey::from_value(ctx.arg(0)?)?;
    let found = ctx.receiver()?.map()?.contains_key(&key);
    Ok(Some(ctx.boolean(found)))
}

fn remove<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let key = MapKey::from_value(ctx.arg(0)?)?;
    let removed = ctx.receiver()?.map_mut()?.remove(&key);
    Ok(Some(removed.map(|(_, v)| v).unwrap_or(Value::Null)))
}

fn size<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let len = ctx.receiver()?.map()?.len();
    Ok(Some(ctx.integer(len as i64)))
}

fn is_empty<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let empty = ctx.receiver()?.map()?.is_empty();
    Ok(Some(ctx.boolean(empty)))
}

/// Keys in key order as a `List<K>`.
fn key_set<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let keys: Vec<Value<'ast>> = ctx
        .receiver()?
        .map()?
        .values()
        .map(|(k, _)| k.clone())
        .collect();
    Ok(Some(ctx.prims().list(ctx.receiver_type_arg(0), keys)))
}

fn values<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let items: Vec<Value<'ast>> = ctx
        .receiver()?
        .map()?
        .values()
        .map(|(_, v)| v.clone())
        .collect();
    Ok(Some(ctx.prims().list(ctx.receiver_type_arg(1), items)))
}
