use bumpalo::Bump;
use talon::{Engine, EngineConfig, RegistrationError, RuntimeError, TalonError};
use talon_ast::{AstBuilder, BinaryOp, PostfixOp};
use talon_core::Modifiers;

use super::common::{PUBLIC_STATIC, debug, execute, init_logging, main_class, output};

#[test]
fn entry_method_can_be_named_explicitly() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let compute = b.method(
        PUBLIC_STATIC,
        Some(b.ty("Integer")),
        "compute",
        &[],
        &[b.ret(Some(b.binary(b.int(6), BinaryOp::Mul, b.int(7))))],
    );
    let main = b.class(Modifiers::PUBLIC, "Main", &[compute]);

    let outcome = execute(&[main], "Main#compute");
    let value = outcome.result.expect("run").expect("a return value");
    assert_eq!(value.as_integer(), Some(42));
    assert!(outcome.output.is_empty());
}

#[test]
fn instance_entry_methods_run_on_a_fresh_instance() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let job = b.class(
        Modifiers::PUBLIC,
        "Job",
        &[
            b.field(Modifiers::PRIVATE, b.ty("String"), "label", Some(b.string("job"))),
            b.method(Modifiers::PUBLIC, None, "action", &[], &[debug(&b, b.var("label"))]),
        ],
    );
    assert_eq!(output(&[job], "Job"), "job\n");
}

#[test]
fn bad_entry_points_are_rejected() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(&b, &[]);

    let mut engine = Engine::new(EngineConfig::new());
    assert!(engine.register(&[main]).errors.is_empty());
    engine.check().expect("check");

    let mut out = Vec::new();
    assert!(matches!(
        engine.run("Main#a#b", &mut out),
        Err(RuntimeError::InvalidEntryPoint { .. })
    ));
    assert!(matches!(
        engine.run("Missing", &mut out),
        Err(RuntimeError::UndefinedClass { .. })
    ));
    assert!(matches!(
        engine.run("Main#nothing", &mut out),
        Err(RuntimeError::UndefinedMethod { .. })
    ));
}

#[test]
fn type_errors_prevent_execution() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            debug(&b, b.string("before")),
            b.var_decl(b.ty("Integer"), "n", Some(b.string("x"))),
        ],
    );
    let outcome = execute(&[main], "Main");
    assert!(matches!(outcome.result, Err(TalonError::Compilation(_))));
    assert!(outcome.output.is_empty());
}

#[test]
fn registration_errors_stop_the_pipeline() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let noop = || b.method(PUBLIC_STATIC, None, "action", &[], &[]);
    let main = b.class(Modifiers::PUBLIC, "Main", &[noop(), noop()]);

    let outcome = execute(&[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Registration(RegistrationError::DuplicateMethod { .. }))
    ));
}

#[test]
fn running_requires_a_successful_check() {
    init_logging();
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(&b, &[debug(&b, b.string("hi"))]);

    let mut engine = Engine::new(EngineConfig::new());
    engine.register(&[main]);
    assert!(!engine.is_checked());

    let mut out = Vec::new();
    assert!(matches!(engine.run("Main", &mut out), Err(RuntimeError::NotChecked)));

    engine.check().expect("check");
    engine.run("Main", &mut out).expect("run");
    assert_eq!(out, b"hi\n");
}

#[test]
fn static_state_starts_fresh_on_every_run() {
    init_logging();
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = b.class(
        Modifiers::PUBLIC,
        "Main",
        &[
            b.field(PUBLIC_STATIC, b.ty("Integer"), "runs", Some(b.int(0))),
            b.method(
                PUBLIC_STATIC,
                None,
                "action",
                &[],
                &[
                    b.expr_stmt(b.postfix(b.var("runs"), PostfixOp::PostInc)),
                    debug(&b, b.var("runs")),
                ],
            ),
        ],
    );

    let mut engine = Engine::new(EngineConfig::new());
    engine.register(&[main]);
    engine.check().expect("check");
    let mut out = Vec::new();
    engine.run("Main", &mut out).expect("first run");
    engine.run("Main", &mut out).expect("second run");
    assert_eq!(out, b"1\n1\n");
}

#[test]
fn division_by_zero_stops_the_run() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "zero", Some(b.int(0))),
            debug(&b, b.string("start")),
            debug(&b, b.binary(b.int(1), BinaryOp::Div, b.var("zero"))),
            debug(&b, b.string("unreachable")),
        ],
    );
    let outcome = execute(&[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::DivisionByZero { .. }))
    ));
    assert_eq!(outcome.output, "start\n");
}

#[test]
fn calls_on_null_are_null_references() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("String"), "text", Some(b.null())),
            debug(&b, b.method_call(b.var("text"), "length", &[])),
        ],
    );
    let outcome = execute(&[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::NullReference { .. }))
    ));
}

#[test]
fn uninitialized_locals_are_null() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("String"), "name", None),
            debug(&b, b.binary(b.var("name"), BinaryOp::Equal, b.null())),
        ],
    );
    assert_eq!(output(&[main], "Main"), "true\n");
}
