//! Compiler passes.
//!
//! - [`registration`]: Pass 1 - turn class declarations into class descriptors
//! - [`checking`]: Pass 2 - type check field initializers and method bodies

pub mod checking;
pub mod registration;

pub use checking::TypeCheckPass;
pub use registration::{RegistrationOutput, RegistrationPass};
