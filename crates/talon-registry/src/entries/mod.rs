//! Class, method and field descriptors.

mod class;
mod field;
mod method;

pub use class::{ClassDescriptor, ClassTable, SuperclassChain};
pub use field::{FieldDescriptor, FieldTable};
pub use method::{MethodBody, MethodDescriptor, MethodParam, MethodTable};
