//! Error types for every phase of a Talon run.
//!
//! ```text
//! TalonError
//! ├── RegistrationError  - structural problems in one class declaration
//! ├── CompilationErrors  - every type error found by the checker
//! └── RuntimeError       - fatal failures while interpreting
//!     └── NativeError    - failures raised by built-in (native) methods
//! ```
//!
//! Registration errors are fatal to one class. Compilation errors are
//! collected across a whole run and block execution. Runtime errors stop
//! the run that raised them.

use std::fmt;

use thiserror::Error;

use crate::{DataType, Span, Visibility};

// ============================================================================
// Registration Errors
// ============================================================================

/// A class declaration that cannot be turned into a class descriptor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    /// Two overloads share a name and an identical parameter-type sequence.
    #[error("method {name} is duplicated")]
    DuplicateMethod { name: String, span: Span },

    /// A parameter name appears twice in one parameter list.
    #[error("parameter name is duplicated: {name}")]
    DuplicateParameter { name: String, span: Span },

    /// Two fields of one class share a name.
    #[error("field {name} is duplicated")]
    DuplicateField { name: String, span: Span },

    /// A class with this name is already in the class table.
    #[error("class {name} is duplicated")]
    DuplicateClass { name: String, span: Span },
}

impl RegistrationError {
    pub fn span(&self) -> Span {
        match self {
            RegistrationError::DuplicateMethod { span, .. }
            | RegistrationError::DuplicateParameter { span, .. }
            | RegistrationError::DuplicateField { span, .. }
            | RegistrationError::DuplicateClass { span, .. } => *span,
        }
    }
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Categories of type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilationErrorKind {
    /// A condition is not Boolean.
    Condition,
    /// A return value does not match the declared return type.
    ReturnType,
    /// A value does not match the type it is stored into.
    TypeMismatch,
    /// An operand has the wrong type for its operator.
    OperandType,
    /// An index expression has the wrong type.
    IndexKey,
    /// `break`/`continue` outside a loop.
    LoopControl,
    /// A private/protected method called through an explicit receiver.
    Visibility,
    /// A name that resolves to nothing.
    Undefined,
    /// A call whose argument count matches no overload.
    Arity,
    /// An instance member used from a static method.
    StaticContext,
    /// A local variable declared twice in one block.
    Redeclaration,
    /// Assignment to something that is not a variable, field or element.
    NotAssignable,
}

/// One type error with its source location.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span}")]
pub struct CompilationError {
    pub kind: CompilationErrorKind,
    pub message: String,
    pub span: Span,
}

impl CompilationError {
    pub fn new(kind: CompilationErrorKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn condition_not_boolean(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::Condition,
            span,
            format!("condition <{ty}> must be Boolean expression"),
        )
    }

    pub fn return_mismatch(actual: &DataType, declared: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::ReturnType,
            span,
            format!("return type <{actual}> does not match {declared}"),
        )
    }

    pub fn type_mismatch(actual: &DataType, expected: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::TypeMismatch,
            span,
            format!("expression <{actual}> does not match <{expected}>"),
        )
    }

    pub fn must_be_integer(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("expression <{ty}> must be Integer"),
        )
    }

    pub fn must_be_numeric(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("expression <{ty}> must be Integer or Double"),
        )
    }

    pub fn must_be_addable(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("expression <{ty}> must be Integer, String or Double"),
        )
    }

    pub fn must_be_boolean(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("expression <{ty}> must be Boolean"),
        )
    }

    pub fn list_key(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::IndexKey,
            span,
            format!("list key <{ty}> must be Integer"),
        )
    }

    pub fn map_key(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::IndexKey,
            span,
            format!("map key <{ty}> must be String"),
        )
    }

    pub fn not_indexable(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("expression <{ty}> must be List or Map"),
        )
    }

    pub fn not_iterable(ty: &DataType, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::OperandType,
            span,
            format!("loop collection <{ty}> must be List"),
        )
    }

    pub fn break_outside_loop(span: Span) -> Self {
        Self::new(
            CompilationErrorKind::LoopControl,
            span,
            "break must be in for/while loop",
        )
    }

    pub fn continue_outside_loop(span: Span) -> Self {
        Self::new(
            CompilationErrorKind::LoopControl,
            span,
            "continue must be in for/while loop",
        )
    }

    pub fn method_not_public(visibility: Visibility, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::Visibility,
            span,
            format!("Method access modifier must be public but {visibility}"),
        )
    }

    pub fn undefined(what: &str, name: &str, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::Undefined,
            span,
            format!("{what} {name} is not defined"),
        )
    }

    pub fn wrong_arity(name: &str, expected: usize, got: usize, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::Arity,
            span,
            format!("method {name} expects {expected} arguments but got {got}"),
        )
    }

    pub fn static_context(name: &str, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::StaticContext,
            span,
            format!("{name} cannot be referenced from a static context"),
        )
    }

    pub fn redeclared(name: &str, span: Span) -> Self {
        Self::new(
            CompilationErrorKind::Redeclaration,
            span,
            format!("variable {name} is already defined"),
        )
    }

    pub fn not_assignable(span: Span) -> Self {
        Self::new(
            CompilationErrorKind::NotAssignable,
            span,
            "expression is not assignable",
        )
    }
}

/// Every type error found in one checking run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationErrors {
    errors: Vec<CompilationError>,
}

impl CompilationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn push(&mut self, error: CompilationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilationError> {
        self.errors.iter()
    }

    /// The messages alone, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<CompilationError> {
        self.errors
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), CompilationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<CompilationError>> for CompilationErrors {
    fn from(errors: Vec<CompilationError>) -> Self {
        Self { errors }
    }
}

impl Extend<CompilationError> for CompilationErrors {
    fn extend<I: IntoIterator<Item = CompilationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for CompilationErrors {
    type Item = CompilationError;
    type IntoIter = std::vec::IntoIter<CompilationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a CompilationErrors {
    type Item = &'a CompilationError;
    type IntoIter = std::slice::Iter<'a, CompilationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for CompilationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompilationErrors {}

// ============================================================================
// Native Errors
// ============================================================================

/// Failures raised inside native (host-provided) methods.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// An instance method was invoked without a receiver.
    #[error("native method called without a receiver")]
    MissingReceiver,

    /// An argument index past the end of the argument list.
    #[error("argument {index} out of bounds (got {count} arguments)")]
    ArgumentIndexOutOfBounds { index: usize, count: usize },

    /// An argument holds a value of the wrong runtime type.
    #[error("argument {index} must be {expected}")]
    ArgumentType { index: usize, expected: &'static str },

    /// The receiver's native state is not what the method expects.
    #[error("expected {expected} state on {class} instance")]
    PayloadMismatch { expected: &'static str, class: String },

    /// A built-in class the native method depends on is not registered.
    #[error("class {name} is not registered")]
    UnknownClass { name: String },

    /// A value that cannot be used as a map key.
    #[error("map key of type {ty} is not supported")]
    UnsupportedKey { ty: String },

    /// An element index outside the collection.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },

    /// A required credential is missing from the environment.
    #[error("missing credential: {name}")]
    MissingCredentials { name: &'static str },

    /// An external service reported a failure.
    #[error("external service failed: {message}")]
    External { message: String },

    /// Writing program output failed.
    #[error("output failed: {message}")]
    Output { message: String },
}

// ============================================================================
// Runtime Errors
// ============================================================================

/// Fatal failures while interpreting a checked program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("method {class}.{name} is not defined")]
    UndefinedMethod { class: String, name: String },

    #[error("field {class}.{name} is not defined")]
    UndefinedField { class: String, name: String },

    #[error("variable {name} is not defined")]
    UndefinedVariable { name: String },

    #[error("class {name} is not defined")]
    UndefinedClass { name: String },

    #[error("null reference at {span}")]
    NullReference { span: Span },

    #[error("division by zero at {span}")]
    DivisionByZero { span: Span },

    #[error("index {index} out of bounds for length {len} at {span}")]
    IndexOutOfBounds { index: i64, len: usize, span: Span },

    #[error("list index '{key}' at {span} is not an integer")]
    InvalidListIndex { key: String, span: Span },

    #[error("method {name} expects {expected} arguments but got {got}")]
    ArgumentCount {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("{name} cannot be used from a static context")]
    StaticContext { name: String },

    #[error("call depth exceeded the limit of {limit}")]
    CallDepthExceeded { limit: usize },

    #[error("invalid entry point '{entry}'")]
    InvalidEntryPoint { entry: String },

    #[error("classes must pass type checking before they can run")]
    NotChecked,

    #[error("no method is executing")]
    NoFrame,

    #[error("expression at {span} is not assignable")]
    NotAssignable { span: Span },

    #[error(transparent)]
    Native(#[from] NativeError),

    #[error("output failed: {0}")]
    Output(#[from] std::io::Error),
}

// ============================================================================
// Top-level
// ============================================================================

/// Any error a Talon pipeline can produce.
#[derive(Debug, Error)]
pub enum TalonError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("{0}")]
    Compilation(#[from] CompilationErrors),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
