//! The `HttpRequest` class.
//!
//! Only the request description is modelled (headers, method, endpoint).
//! Sending it is left to the host.

use talon_core::{DataType, Modifiers, NativeError};
use talon_registry::{
    CallContext, ClassDescriptor, HttpRequestState, MethodDescriptor, NativePayload, NativeResult,
    Value, create_class,
};

pub const CLASS_NAME: &str = "HttpRequest";

/// `HttpRequest` with its constructor, setters and getters.
pub fn class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class(CLASS_NAME, Modifiers::PUBLIC | Modifiers::GLOBAL);
    let string = DataType::string;

    class.add_constructor(MethodDescriptor::native(CLASS_NAME, None, vec![], construct));

    class.add_method(MethodDescriptor::native(
        "setHeader",
        None,
        vec![string(), string()],
        set_header,
    ));
    class.add_method(MethodDescriptor::native(
        "getHeader",
        Some(string()),
        vec![string()],
        get_header,
    ));
    class.add_method(MethodDescriptor::native("setMethod", None, vec![string()], set_method));
    class.add_method(MethodDescriptor::native("getMethod", Some(string()), vec![], get_method));
    class.add_method(MethodDescriptor::native(
        "setEndpoint",
        None,
        vec![string()],
        set_endpoint,
    ));
    class.add_method(MethodDescriptor::native(
        "getEndpoint",
        Some(string()),
        vec![],
        get_endpoint,
    ));
    class
}

fn construct<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    ctx.receiver()?
        .set_payload(NativePayload::HttpRequest(HttpRequestState::default()));
    Ok(None)
}

/// Run `f` on the receiver's request state.
fn with_request<R>(
    ctx: &CallContext<'_, '_>,
    f: impl FnOnce(&mut HttpRequestState) -> R,
) -> Result<R, NativeError> {
    let receiver = ctx.receiver()?;
    let mut payload = receiver.payload_mut();
    match &mut *payload {
        NativePayload::HttpRequest(state) => Ok(f(state)),
        _ => Err(receiver.payload_mismatch(CLASS_NAME)),
    }
}

fn optional_string<'ast>(ctx: &CallContext<'_, 'ast>, value: Option<String>) -> Value<'ast> {
    value.map_or(Value::Null, |s| ctx.string(s))
}

fn set_header<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let (name, value) = (ctx.string_arg(0)?, ctx.string_arg(1)?);
    with_request(ctx, |state| state.headers.insert(name, value))?;
    Ok(None)
}

fn get_header<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let name = ctx.string_arg(0)?;
    let value = with_request(ctx, |state| state.headers.get(&name).cloned())?;
    Ok(Some(optional_string(ctx, value)))
}

fn set_method<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let method = ctx.string_arg(0)?;
    with_request(ctx, |state| state.method = Some(method))?;
    Ok(None)
}

fn get_method<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let method = with_request(ctx, |state| state.method.clone())?;
    Ok(Some(optional_string(ctx, method)))
}

fn set_endpoint<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let endpoint = ctx.string_arg(0)?;
    with_request(ctx, |state| state.endpoint = Some(endpoint))?;
    Ok(None)
}

fn get_endpoint<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let endpoint = with_request(ctx, |state| state.endpoint.clone())?;
    Ok(Some(optional_string(ctx, endpoint)))
}
