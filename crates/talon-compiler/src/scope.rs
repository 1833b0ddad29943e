//! Local scope management for method checking.
//!
//! `LocalScope` tracks the local variables visible at each point of a
//! method body:
//! - Declarations record the block depth they belong to
//! - Nested blocks may shadow outer variables; the outer one comes back
//!   when the block ends
//! - Redeclaring a name in the same block is an error
//!
//! Names are case-insensitive.

use rustc_hash::FxHashMap;
use talon_core::{CompilationError, DataType, Span};

/// A declared local variable or parameter.
#[derive(Debug, Clone)]
pub struct LocalVar {
    /// Name as written
    pub name: String,
    /// Declared type; `None` when the declared type did not resolve
    pub data_type: Option<DataType>,
    /// Block depth of the declaration (0 = method parameters)
    pub depth: u32,
    pub span: Span,
}

/// Local variables of one method body.
#[derive(Debug, Default)]
pub struct LocalScope {
    /// Visible variables keyed by lower-cased name
    variables: FxHashMap<String, LocalVar>,
    /// Current block depth
    depth: u32,
    /// Variables hidden by a shadowing declaration: (shadowing depth, key, var)
    shadowed: Vec<(u32, String, LocalVar)>,
}

impl LocalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a block.
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave a block, dropping its variables and restoring shadowed ones.
    pub fn pop_scope(&mut self) {
        let depth = self.depth;
        self.variables.retain(|_, var| var.depth < depth);

        while let Some((shadow_depth, _, _)) = self.shadowed.last() {
            if *shadow_depth != depth {
                break;
            }
            if let Some((_, key, var)) = self.shadowed.pop() {
                self.variables.insert(key, var);
            }
        }

        self.depth = depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Declare a variable in the current block.
    pub fn declare(
        &mut self,
        name: &str,
        data_type: Option<DataType>,
        span: Span,
    ) -> Result<(), CompilationError> {
        let key = name.to_ascii_lowercase();
        if let Some(existing) = self.variables.get(&key) {
            if existing.depth == self.depth {
                return Err(CompilationError::redeclared(name, span));
            }
            self.shadowed.push((self.depth, key.clone(), existing.clone()));
        }

        self.variables.insert(
            key,
            LocalVar {
                name: name.to_string(),
                data_type,
                depth: self.depth,
                span,
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&LocalVar> {
        self.variables.get(&name.to_ascii_lowercase())
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_and_lookup_ignore_case() {
        let mut scope = LocalScope::new();
        scope
            .declare("count", Some(DataType::integer()), Span::default())
            .expect("declare");
        let var = scope.lookup("COUNT").expect("visible");
        assert_eq!(var.data_type, Some(DataType::integer()));
        assert_eq!(var.name, "count");
    }

    #[test]
    fn redeclaration_in_same_block_fails() {
        let mut scope = LocalScope::new();
        scope.declare("x", None, Span::default()).expect("declare");
        let err = scope.declare("X", None, Span::point(2, 1)).expect_err("duplicate");
        assert_eq!(err.message(), "variable X is already defined");
    }

    #[test]
    fn shadowing_is_undone_when_the_block_ends() {
        let mut scope = LocalScope::new();
        scope
            .declare("x", Some(DataType::integer()), Span::default())
            .expect("declare");
        scope.push_scope();
        scope
            .declare("x", Some(DataType::string()), Span::default())
            .expect("shadow");
        scope.declare("y", None, Span::default()).expect("declare");
        assert_eq!(
            scope.lookup("x").and_then(|v| v.data_type.clone()),
            Some(DataType::string())
        );
        scope.pop_scope();
        assert_eq!(
            scope.lookup("x").and_then(|v| v.data_type.clone()),
            Some(DataType::integer())
        );
        assert!(!scope.is_declared("y"));
        assert_eq!(scope.depth(), 0);
    }
}
