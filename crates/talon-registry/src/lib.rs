//! Runtime object model for Talon.
//!
//! - [`entries`]: class, method and field descriptors plus their
//!   case-insensitive tables
//! - [`runtime`]: live values, native payloads and the native call boundary
//! - [`builtins`]: the primitive and container classes every run starts with
//!
//! User classes (built by the registration pass) and built-in classes
//! (built by hand) go through the same [`create_class`], [`create_method`]
//! and [`create_field`] factories, so both have the same shape.

pub mod builtins;
pub mod entries;
mod factory;
mod name_map;
pub mod runtime;

pub use builtins::Primitives;
pub use entries::{
    ClassDescriptor, ClassTable, FieldDescriptor, FieldTable, MethodBody, MethodDescriptor,
    MethodParam, MethodTable,
};
pub use factory::{create_class, create_field, create_method};
pub use name_map::NameMap;
pub use runtime::{
    CallContext, Extras, HttpRequestState, MapKey, NativeFn, NativePayload, NativeResult, Object,
    QueryCredentials, QueryExecutor, QueryRow, Value, ValueTable,
};
