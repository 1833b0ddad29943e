//! The `Date` class.
//!
//! A `Date` instance carries a [`NaiveDate`] payload. `format()` renders
//! it as `YYYY/MM/DD`.

use chrono::{Datelike, Local, NaiveDate};
use talon_core::{DataType, Modifiers, NativeError, primitives};
use talon_registry::{
    CallContext, ClassDescriptor, MethodDescriptor, NativePayload, NativeResult, Value, create_class,
};

pub const CLASS_NAME: &str = "Date";

/// Layout used by `Date#format()`.
pub const FORMAT: &str = "%Y/%m/%d";

fn date_type() -> DataType {
    DataType::simple(CLASS_NAME)
}

/// `Date` with its static factories and instance accessors.
pub fn class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class(CLASS_NAME, Modifiers::PUBLIC | Modifiers::GLOBAL);

    // =========================================================================
    // STATIC FACTORIES
    // =========================================================================

    class.add_method(MethodDescriptor::native_static(
        "today",
        Some(date_type()),
        vec![],
        today,
    ));
    class.add_method(MethodDescriptor::native_static(
        "newInstance",
        Some(date_type()),
        vec![DataType::integer(), DataType::integer(), DataType::integer()],
        new_instance,
    ));

    // =========================================================================
    // INSTANCE METHODS
    // =========================================================================

    class.add_method(MethodDescriptor::native(
        "format",
        Some(DataType::simple(primitives::STRING)),
        vec![],
        format,
    ));
    class.add_method(MethodDescriptor::native("year", Some(DataType::integer()), vec![], year));
    class.add_method(MethodDescriptor::native("month", Some(DataType::integer()), vec![], month));
    class.add_method(MethodDescriptor::native("day", Some(DataType::integer()), vec![], day));
    class
}

fn date_value<'ast>(ctx: &CallContext<'_, 'ast>, date: NaiveDate) -> NativeResult<'ast> {
    let object = ctx.new_object(CLASS_NAME, Vec::new())?;
    object.set_payload(NativePayload::Date(date));
    Ok(Some(Value::from(object)))
}

fn today<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    date_value(ctx, Local::now().date_naive())
}

fn new_instance<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let (year, month, day) = (ctx.integer_arg(0)?, ctx.integer_arg(1)?, ctx.integer_arg(2)?);
    let date = i32::try_from(year)
        .ok()
        .zip(u32::try_from(month).ok())
        .zip(u32::try_from(day).ok())
        .and_then(|((y, m), d)| NaiveDate::from_ymd_opt(y, m, d))
        .ok_or_else(|| NativeError::External {
            message: format!("invalid date {year}-{month}-{day}"),
        })?;
    date_value(ctx, date)
}

/// The receiver's date.
fn receiver_date(ctx: &CallContext<'_, '_>) -> Result<NaiveDate, NativeError> {
    let receiver = ctx.receiver()?;
    match &*receiver.payload() {
        NativePayload::Date(date) => Ok(*date),
        _ => Err(receiver.payload_mismatch(CLASS_NAME)),
    }
}

fn format<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let date = receiver_date(ctx)?;
    Ok(Some(ctx.string(date.format(FORMAT).to_string())))
}

fn year<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let date = receiver_date(ctx)?;
    Ok(Some(ctx.integer(i64::from(date.year()))))
}

fn month<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let date = receiver_date(ctx)?;
    Ok(Some(ctx.integer(i64::from(date.month()))))
}

fn day<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let date = receiver_date(ctx)?;
    Ok(Some(ctx.integer(i64::from(date.day()))))
}
