//! The `System` class.

use talon_core::{DataType, Modifiers, primitives};
use talon_registry::{CallContext, ClassDescriptor, MethodDescriptor, NativeResult, create_class};

/// `System` with its static methods.
pub fn class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class("System", Modifiers::PUBLIC | Modifiers::GLOBAL);
    class.add_method(MethodDescriptor::native_static(
        "debug",
        None,
        vec![DataType::simple(primitives::OBJECT)],
        debug,
    ));
    class
}

/// Write the argument's display form and a newline to the program output.
fn debug<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let text = ctx.arg(0)?.to_string();
    ctx.write_line(&text)?;
    Ok(None)
}
