//! Shared helpers for building and running test programs.

#![allow(dead_code)]

use talon::{Engine, EngineConfig, TalonError, Value};
use talon_ast::{AstBuilder, ClassDecl, ClassMember, Expr, Stmt};
use talon_core::Modifiers;

pub const PUBLIC_STATIC: Modifiers = Modifiers::PUBLIC.union(Modifiers::STATIC);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `System.debug(value);`
pub fn debug<'ast>(b: &AstBuilder<'ast>, value: Expr<'ast>) -> Stmt<'ast> {
    b.expr_stmt(b.method_call(b.var("System"), "debug", &[value]))
}

/// `public static void action() { body }`
pub fn action<'ast>(b: &AstBuilder<'ast>, body: &[Stmt<'ast>]) -> ClassMember<'ast> {
    b.method(PUBLIC_STATIC, None, "action", &[], body)
}

/// `public class Main { public static void action() { body } }`
pub fn main_class<'ast>(b: &AstBuilder<'ast>, body: &[Stmt<'ast>]) -> &'ast ClassDecl<'ast> {
    b.class(Modifiers::PUBLIC, "Main", &[action(b, body)])
}

pub struct Outcome<'ast> {
    pub output: String,
    pub result: Result<Option<Value<'ast>>, TalonError>,
}

pub fn execute_with<'ast>(
    mut engine: Engine<'ast>,
    decls: &[&'ast ClassDecl<'ast>],
    entry: &str,
) -> Outcome<'ast> {
    init_logging();
    let mut out = Vec::new();
    let result = engine.execute(decls, entry, &mut out);
    Outcome {
        output: String::from_utf8_lossy(&out).into_owned(),
        result,
    }
}

pub fn execute<'ast>(decls: &[&'ast ClassDecl<'ast>], entry: &str) -> Outcome<'ast> {
    execute_with(Engine::new(EngineConfig::new()), decls, entry)
}

/// Output of a program that is expected to run cleanly.
pub fn output<'ast>(decls: &[&'ast ClassDecl<'ast>], entry: &str) -> String {
    let outcome = execute(decls, entry);
    if let Err(e) = &outcome.result {
        panic!("program failed: {e}");
    }
    outcome.output
}

/// Messages of the type errors that stopped a program.
pub fn compilation_messages<'ast>(decls: &[&'ast ClassDecl<'ast>]) -> Vec<String> {
    match execute(decls, "Main").result {
        Err(TalonError::Compilation(errors)) => {
            errors.messages().into_iter().map(str::to_string).collect()
        }
        other => panic!("expected type errors, got {other:?}"),
    }
}
