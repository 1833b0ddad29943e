//! Talon
//!
//! Registers, type checks and interprets programs written in a
//! class-based, statically typed object language. Source text is parsed
//! elsewhere; Talon starts from the class declarations in [`talon_ast`].
//!
//! ## Pipeline
//!
//! 1. **Registration**: every declaration becomes a class descriptor
//!    ([`talon_compiler::RegistrationPass`])
//! 2. **Type checking**: every field initializer and method body is
//!    checked against the full class table
//!    ([`talon_compiler::TypeCheckPass`])
//! 3. **Execution**: the [`interpreter`] walks the checked AST from a
//!    `Class#method` entry point
//!
//! [`Engine`] runs the three steps; [`EngineConfig`] holds its settings.

pub mod config;
pub mod engine;
pub mod interpreter;

pub use config::EngineConfig;
pub use engine::{Engine, EntryPoint};
pub use interpreter::{Flow, Interpreter, RunHost};

pub use talon_core::{
    CompilationError, CompilationErrors, NativeError, RegistrationError, RuntimeError, TalonError,
};
pub use talon_registry::{QueryCredentials, QueryExecutor, QueryRow, Value};
