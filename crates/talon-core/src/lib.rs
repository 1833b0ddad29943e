//! Core types shared by every Talon crate.
//!
//! - [`Span`] for source locations
//! - [`Modifiers`] and [`Visibility`] for declaration modifiers
//! - [`DataType`] for static and runtime type names
//! - The error hierarchy in [`error`]

pub mod data_type;
pub mod error;
pub mod modifiers;
pub mod span;

pub use data_type::{DataType, primitives};
pub use error::{
    CompilationError, CompilationErrorKind, CompilationErrors, NativeError, RegistrationError,
    RuntimeError, TalonError,
};
pub use modifiers::{Modifiers, Visibility};
pub use span::Span;
