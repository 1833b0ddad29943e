//! The register, check and run pipeline.
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use talon::{Engine, EngineConfig};
//! use talon_ast::AstBuilder;
//! use talon_core::Modifiers;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let main = b.class(
//!     Modifiers::PUBLIC,
//!     "Main",
//!     &[b.method(
//!         Modifiers::PUBLIC | Modifiers::STATIC,
//!         None,
//!         "action",
//!         &[],
//!         &[b.expr_stmt(b.method_call(b.var("System"), "debug", &[b.string("hi")]))],
//!     )],
//! );
//!
//! let mut engine = Engine::new(EngineConfig::new());
//! let mut out = Vec::new();
//! engine.execute(&[main], "Main", &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "hi\n");
//! ```

use std::io::Write;

use log::debug;
use talon_ast::ClassDecl;
use talon_compiler::{RegistrationOutput, RegistrationPass, TypeCheckPass};
use talon_core::{CompilationErrors, RuntimeError, TalonError};
use talon_registry::{ClassTable, QueryExecutor, Value};

use crate::config::EngineConfig;
use crate::interpreter::{Interpreter, RunHost};

/// A parsed `Class#method` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub class: String,
    pub method: String,
}

impl EntryPoint {
    /// Parse `Class#method`, or `Class` alone to run `default_method`.
    pub fn parse(entry: &str, default_method: &str) -> Result<Self, RuntimeError> {
        let invalid = || RuntimeError::InvalidEntryPoint {
            entry: entry.to_string(),
        };
        let (class, method) = match entry.split_once('#') {
            Some((class, method)) if !method.contains('#') => (class, method),
            Some(_) => return Err(invalid()),
            None => (entry, ""),
        };
        let class = class.trim();
        let method = method.trim();
        if class.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            class: class.to_string(),
            method: if method.is_empty() { default_method } else { method }.to_string(),
        })
    }
}

/// Owns the class table of one program and runs it.
///
/// The table starts with the primitive, container and library classes.
/// Each engine is independent; nothing is shared between engines.
pub struct Engine<'ast> {
    config: EngineConfig,
    classes: ClassTable<'ast>,
    query: Option<Box<dyn QueryExecutor>>,
    checked: bool,
}

impl<'ast> Engine<'ast> {
    pub fn new(config: EngineConfig) -> Self {
        let mut classes = ClassTable::with_primitives();
        talon_modules::install(&mut classes);
        Self {
            config,
            classes,
            query: None,
            checked: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classes(&self) -> &ClassTable<'ast> {
        &self.classes
    }

    /// Service that answers query expressions and `Database.query`.
    pub fn set_query_executor(&mut self, executor: impl QueryExecutor + 'static) {
        self.query = Some(Box::new(executor));
    }

    /// Register class declarations. Classes that fail registration are
    /// left out; the rest are added. Adding classes requires a new check.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn register(&mut self, decls: &[&ClassDecl<'ast>]) -> RegistrationOutput {
        let output = RegistrationPass::new().register_all(decls, &mut self.classes);
        debug!(
            "registered {} classes ({} rejected)",
            output.classes_registered,
            output.errors.len()
        );
        self.checked = false;
        output
    }

    /// Type check every class. Running requires a successful check.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn check(&mut self) -> Result<(), CompilationErrors> {
        let errors = TypeCheckPass::new(&self.classes).check_all();
        debug!("type check finished with {} errors", errors.len());
        self.checked = errors.is_empty();
        errors.into_result()
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Run an entry point, writing program output to `out`. Returns the
    /// entry method's result.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&self, entry: &str, out: &mut dyn Write) -> Result<Option<Value<'ast>>, RuntimeError> {
        if !self.checked {
            return Err(RuntimeError::NotChecked);
        }
        let entry = EntryPoint::parse(entry, self.config.entry_method())?;
        let host = RunHost {
            out,
            query: self.query.as_deref(),
            credentials: self.config.credentials(),
        };
        let mut interpreter = Interpreter::new(&self.classes, host, self.config.max_call_depth())?;
        let result = interpreter.run_entry(&entry.class, &entry.method);
        interpreter.flush()?;
        result
    }

    /// Register, check and run in one step. Any registration or type
    /// error stops the pipeline before execution.
    pub fn execute(
        &mut self,
        decls: &[&ClassDecl<'ast>],
        entry: &str,
        out: &mut dyn Write,
    ) -> Result<Option<Value<'ast>>, TalonError> {
        let registered = self.register(decls);
        if let Some(error) = registered.errors.into_iter().next() {
            return Err(error.into());
        }
        self.check()?;
        Ok(self.run(entry, out)?)
    }
}
