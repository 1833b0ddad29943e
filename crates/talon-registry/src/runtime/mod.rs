//! Live values and the native call boundary.

mod call_context;
mod payload;
pub mod query;
mod value;

pub use call_context::{CallContext, Extras, NativeFn, NativeResult};
pub use payload::{HttpRequestState, MapKey, NativePayload};
pub use query::{QueryCredentials, QueryExecutor, QueryRow};
pub use value::{Object, Value, ValueTable};
