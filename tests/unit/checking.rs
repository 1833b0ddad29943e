use bumpalo::Bump;
use talon::{Engine, EngineConfig};
use talon_ast::{AstBuilder, BinaryOp};
use talon_core::Modifiers;

use super::common::{PUBLIC_STATIC, compilation_messages, debug, init_logging, main_class};

#[test]
fn mismatched_initializer_and_assignment() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "i", Some(b.int(1))),
            b.var_decl(b.ty("String"), "j", Some(b.int(1))),
            b.expr_stmt(b.assign(b.var("i"), b.string("x"))),
        ],
    );
    assert_eq!(
        compilation_messages(&[main]),
        vec![
            "expression <Integer> does not match <String>",
            "expression <String> does not match <Integer>",
        ]
    );
}

#[test]
fn operand_categories() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            debug(&b, b.binary(b.int(1), BinaryOp::Add, b.boolean(true))),
            debug(&b, b.binary(b.string("a"), BinaryOp::Add, b.int(1))),
            debug(&b, b.binary(b.string("a"), BinaryOp::Sub, b.int(1))),
        ],
    );
    assert_eq!(
        compilation_messages(&[main]),
        vec![
            "expression <Boolean> must be Integer, String or Double",
            "expression <String> does not match <Integer>",
            "expression <String> must be Integer or Double",
        ]
    );
}

#[test]
fn conditions_returns_and_loop_control() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let count = b.method(
        PUBLIC_STATIC,
        Some(b.ty("Integer")),
        "count",
        &[],
        &[
            b.while_stmt(b.int(1), b.brk()),
            b.brk(),
            b.ret(Some(b.string("many"))),
        ],
    );
    let main = b.class(Modifiers::PUBLIC, "Main", &[count]);
    assert_eq!(
        compilation_messages(&[main]),
        vec![
            "condition <Integer> must be Boolean expression",
            "break must be in for/while loop",
            "return type <String> does not match Integer",
        ]
    );
}

#[test]
fn private_methods_need_an_implicit_receiver() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let secret = b.method(
        Modifiers::PRIVATE,
        Some(b.ty("Integer")),
        "secret",
        &[],
        &[b.ret(Some(b.int(7)))],
    );
    let reveal = b.method(
        Modifiers::PUBLIC,
        Some(b.ty("Integer")),
        "reveal",
        &[],
        &[b.ret(Some(b.call("secret", &[])))],
    );
    let vault = b.class(Modifiers::PUBLIC, "Vault", &[secret, reveal]);
    let main = main_class(
        &b,
        &[
            debug(&b, b.method_call(b.new_object(b.ty("Vault"), &[]), "reveal", &[])),
            debug(&b, b.method_call(b.new_object(b.ty("Vault"), &[]), "secret", &[])),
        ],
    );
    assert_eq!(
        compilation_messages(&[vault, main]),
        vec!["Method access modifier must be public but private"]
    );
}

#[test]
fn checking_twice_reports_the_same_errors() {
    init_logging();
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.if_stmt(b.string("yes"), b.block_stmt(&[]), None),
            b.cont(),
        ],
    );

    let mut engine = Engine::new(EngineConfig::new());
    assert!(engine.register(&[main]).errors.is_empty());
    let first = engine.check().expect_err("type errors");
    let second = engine.check().expect_err("type errors");
    assert_eq!(first.messages(), second.messages());
    assert_eq!(
        first.messages(),
        vec![
            "condition <String> must be Boolean expression",
            "continue must be in for/while loop",
        ]
    );
    assert!(!engine.is_checked());
}
