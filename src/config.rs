//! Engine configuration.

use talon_registry::QueryCredentials;

/// Method run when an entry point names only a class.
pub const DEFAULT_ENTRY_METHOD: &str = "action";
/// Deepest method nesting a run may reach.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Settings for an [`Engine`](crate::Engine).
///
/// ```
/// use talon::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_entry_method("run")
///     .with_max_call_depth(64);
/// assert_eq!(config.entry_method(), "run");
/// assert_eq!(config.max_call_depth(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    entry_method: String,
    max_call_depth: usize,
    credentials: QueryCredentials,
}

impl EngineConfig {
    /// Defaults with no query credentials.
    pub fn new() -> Self {
        Self {
            entry_method: DEFAULT_ENTRY_METHOD.to_string(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            credentials: QueryCredentials::default(),
        }
    }

    /// Defaults with query credentials read from the environment.
    pub fn from_env() -> Self {
        Self::new().with_credentials(QueryCredentials::from_env())
    }

    pub fn with_entry_method(mut self, method: impl Into<String>) -> Self {
        self.entry_method = method.into();
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_credentials(mut self, credentials: QueryCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn entry_method(&self) -> &str {
        &self.entry_method
    }

    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    pub fn credentials(&self) -> &QueryCredentials {
        &self.credentials
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
