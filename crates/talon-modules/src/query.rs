//! Query expressions and `Database.query(String)`.
//!
//! Query text goes to the host's [`QueryExecutor`] unchanged, together
//! with the configured credentials. Each returned row becomes an
//! `Account` instance: the id lands in `Id`, every other column in a
//! String field of the same name.

use std::rc::Rc;

use log::debug;
use talon_core::{DataType, Modifiers, NativeError};
use talon_registry::runtime::query::{ROW_CLASS, row_list_type};
use talon_registry::{
    CallContext, ClassDescriptor, ClassTable, MethodDescriptor, NativeResult, Object, Primitives,
    QueryCredentials, QueryExecutor, QueryRow, Value, create_class,
};

use crate::account::ID_FIELD;

pub const CLASS_NAME: &str = "Database";

/// `Database` with its static `query` method.
pub fn class<'ast>() -> ClassDescriptor<'ast> {
    let mut class = create_class(CLASS_NAME, Modifiers::PUBLIC | Modifiers::GLOBAL);
    class.add_method(MethodDescriptor::native_static(
        "query",
        Some(row_list_type()),
        vec![DataType::string()],
        query,
    ));
    class
}

fn query<'ast>(ctx: &mut CallContext<'_, 'ast>) -> NativeResult<'ast> {
    let text = ctx.string_arg(0)?;
    let list = run_query(
        ctx.query_executor(),
        ctx.credentials(),
        &text,
        ctx.classes(),
        ctx.prims(),
    )?;
    Ok(Some(list))
}

/// Execute `query` and build the resulting `List<Account>`.
pub fn run_query<'ast>(
    executor: Option<&dyn QueryExecutor>,
    credentials: &QueryCredentials,
    query: &str,
    classes: &ClassTable<'ast>,
    prims: &Primitives<'ast>,
) -> Result<Value<'ast>, NativeError> {
    let executor = executor.ok_or_else(|| NativeError::External {
        message: "no query executor is configured".to_string(),
    })?;
    let rows = executor.execute(credentials, query)?;
    debug!("query returned {} rows: {query}", rows.len());
    materialize(rows, classes, prims)
}

/// Turn rows into a `List<Account>` value.
pub fn materialize<'ast>(
    rows: Vec<QueryRow>,
    classes: &ClassTable<'ast>,
    prims: &Primitives<'ast>,
) -> Result<Value<'ast>, NativeError> {
    let class = classes
        .get(ROW_CLASS)
        .ok_or_else(|| NativeError::UnknownClass {
            name: ROW_CLASS.to_string(),
        })?;

    let records = rows
        .into_iter()
        .map(|row| {
            let record = Object::new(Rc::clone(class), Vec::new());
            record.set_field(ID_FIELD, prims.string(row.id));
            for (name, value) in row.fields {
                record.set_field(&name, prims.string(value));
            }
            Value::from(record)
        })
        .collect();
    Ok(prims.list(DataType::simple(ROW_CLASS), records))
}

/// A [`QueryExecutor`] answering every query with a fixed set of rows.
///
/// Requires complete credentials, like a real service would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueryExecutor {
    rows: Vec<QueryRow>,
}

impl InMemoryQueryExecutor {
    pub fn new(rows: Vec<QueryRow>) -> Self {
        Self { rows }
    }

    pub fn with_row(mut self, row: QueryRow) -> Self {
        self.rows.push(row);
        self
    }
}

impl QueryExecutor for InMemoryQueryExecutor {
    fn execute(
        &self,
        credentials: &QueryCredentials,
        query: &str,
    ) -> Result<Vec<QueryRow>, NativeError> {
        let (username, _, endpoint) = credentials.require()?;
        debug!("{username}@{endpoint}: {query}");
        Ok(self.rows.clone())
    }
}
