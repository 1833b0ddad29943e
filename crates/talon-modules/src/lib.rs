//! Built-in library classes for Talon.
//!
//! - **system** - `System.debug(Object)` writing to the program output
//! - **date** - `Date` values (`Date.today()`, `format()`)
//! - **http_request** - `HttpRequest` builder state
//! - **account** - the `Account` record class query rows materialize into
//! - **query** - `Database.query(String)` and the query executor plumbing
//!
//! # Usage
//!
//! ```
//! use talon_registry::ClassTable;
//!
//! let mut classes = ClassTable::with_primitives();
//! talon_modules::install(&mut classes);
//! assert!(classes.contains("System"));
//! ```

pub mod account;
pub mod date;
pub mod http_request;
pub mod query;
pub mod system;

pub use query::{InMemoryQueryExecutor, run_query};

use talon_registry::ClassTable;

/// Register every library class.
pub fn install(classes: &mut ClassTable<'_>) {
    classes.insert(system::class());
    classes.insert(date::class());
    classes.insert(http_request::class());
    classes.insert(account::class());
    classes.insert(query::class());
}
