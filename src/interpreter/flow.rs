//! Statement outcomes.

use talon_registry::Value;

/// How a statement finished.
#[derive(Debug, Clone, Default)]
pub enum Flow<'ast> {
    /// Fall through to the next statement.
    #[default]
    Normal,
    /// Leave the method, with a value unless the method is void.
    Return(Option<Value<'ast>>),
    /// Leave the innermost loop.
    Break,
    /// Skip to the next iteration of the innermost loop.
    Continue,
}

impl Flow<'_> {
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Flow::Normal)
    }
}
