//! The `Account` record class.

use talon_core::{DataType, Modifiers};
use talon_registry::runtime::query::ROW_CLASS;
use talon_registry::{ClassDescriptor, create_class, create_field};

/// Field holding the record id.
pub const ID_FIELD: &str = "Id";

/// `Account` with its `Id` and `Name` fields.
pub fn class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class(ROW_CLASS, Modifiers::PUBLIC | Modifiers::GLOBAL);
    class.add_field(create_field(ID_FIELD, DataType::string()));
    class.add_field(create_field("Name", DataType::string()));
    class
}
