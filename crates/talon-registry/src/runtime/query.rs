//! The external query capability.
//!
//! Query expressions are handed verbatim to a [`QueryExecutor`] supplied by
//! the host. Executors authenticate with [`QueryCredentials`], normally
//! read from the environment.

use std::fmt;

use talon_core::{DataType, NativeError};

/// Environment variable holding the query user name.
pub const USERNAME_VAR: &str = "TALON_QUERY_USERNAME";
/// Environment variable holding the query password.
pub const PASSWORD_VAR: &str = "TALON_QUERY_PASSWORD";
/// Environment variable holding the query service endpoint.
pub const ENDPOINT_VAR: &str = "TALON_QUERY_ENDPOINT";

/// Class of the rows a query returns.
pub const ROW_CLASS: &str = "Account";

/// Static type of a query expression: `List<Account>`.
pub fn row_list_type() -> DataType {
    DataType::list_of(DataType::simple(ROW_CLASS))
}

/// Credentials for the query service.
#[derive(Clone, Default, PartialEq)]
pub struct QueryCredentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub endpoint: Option<String>,
}

impl QueryCredentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            username: lookup(USERNAME_VAR),
            password: lookup(PASSWORD_VAR),
            endpoint: lookup(ENDPOINT_VAR),
        }
    }

    /// `(username, password, endpoint)`, or the first missing variable.
    pub fn require(&self) -> Result<(&str, &str, &str), NativeError> {
        let username = self
            .username
            .as_deref()
            .ok_or(NativeError::MissingCredentials { name: USERNAME_VAR })?;
        let password = self
            .password
            .as_deref()
            .ok_or(NativeError::MissingCredentials { name: PASSWORD_VAR })?;
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or(NativeError::MissingCredentials { name: ENDPOINT_VAR })?;
        Ok((username, password, endpoint))
    }
}

impl fmt::Debug for QueryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCredentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// One record returned by the query service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRow {
    pub id: String,
    /// String-valued fields other than the id, in service order.
    pub fields: Vec<(String, String)>,
}

impl QueryRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// Executes query text against an external record store.
pub trait QueryExecutor {
    fn execute(
        &self,
        credentials: &QueryCredentials,
        query: &str,
    ) -> Result<Vec<QueryRow>, NativeError>;
}
