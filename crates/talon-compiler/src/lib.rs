//! Talon Compiler
//!
//! The semantic front end: a 2-pass pipeline over parsed class
//! declarations.
//!
//! ## Architecture
//!
//! - **Pass 1 (Registration)**: build a class descriptor per declaration,
//!   rejecting duplicate overloads and duplicate parameter names
//! - **Pass 2 (Type checking)**: walk every field initializer and method
//!   body against the complete class table, collecting every type error
//!
//! ## Modules
//!
//! - [`checker`]: per-method checking state
//! - [`context`]: class-level checking context and type resolution
//! - [`conversion`]: assignability between static types
//! - [`expr`]: expression type inference
//! - [`overload`]: overload resolution for calls and constructors
//! - [`passes`]: the registration and type check passes
//! - [`scope`]: local scope management
//! - [`stmt`]: statement checking

pub mod checker;
pub mod context;
pub mod conversion;
pub mod expr;
pub mod overload;
pub mod passes;
pub mod scope;
pub mod stmt;

pub use checker::MethodChecker;
pub use context::CheckContext;
pub use conversion::{fits_exactly, is_assignable};
pub use overload::{MatchKind, OverloadMatch, TypeBindings, resolve_overload};
pub use passes::{RegistrationOutput, RegistrationPass, TypeCheckPass};
pub use scope::{LocalScope, LocalVar};

// Re-export the error types from core for convenience
pub use talon_core::{CompilationError, CompilationErrors, RegistrationError};

use talon_registry::ClassTable;

/// Type check every class in `classes`.
pub fn check(classes: &ClassTable<'_>) -> Result<(), CompilationErrors> {
    TypeCheckPass::new(classes).check_all().into_result()
}
