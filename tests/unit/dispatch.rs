use bumpalo::Bump;
use talon::{Engine, EngineConfig, RuntimeError, TalonError};
use talon_ast::{AstBuilder, BinaryOp, PostfixOp};
use talon_core::Modifiers;

use super::common::{PUBLIC_STATIC, debug, execute_with, main_class, output};

#[test]
fn instance_fields_keep_state_between_calls() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let counter = b.class(
        Modifiers::PUBLIC,
        "Counter",
        &[
            b.field(Modifiers::PRIVATE, b.ty("Integer"), "count", Some(b.int(0))),
            b.method(
                Modifiers::PUBLIC,
                None,
                "increment",
                &[],
                &[b.expr_stmt(b.postfix(b.var("count"), PostfixOp::PostInc))],
            ),
            b.method(
                Modifiers::PUBLIC,
                None,
                "twice",
                &[],
                &[
                    b.expr_stmt(b.call("increment", &[])),
                    b.expr_stmt(b.call("increment", &[])),
                ],
            ),
            b.method(
                Modifiers::PUBLIC,
                Some(b.ty("Integer")),
                "get",
                &[],
                &[b.ret(Some(b.var("count")))],
            ),
        ],
    );
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Counter"), "c", Some(b.new_object(b.ty("Counter"), &[]))),
            b.expr_stmt(b.method_call(b.var("c"), "twice", &[])),
            debug(&b, b.method_call(b.var("c"), "get", &[])),
            b.var_decl(b.ty("Counter"), "other", Some(b.new_object(b.ty("Counter"), &[]))),
            debug(&b, b.method_call(b.var("other"), "get", &[])),
        ],
    );
    assert_eq!(output(&[counter, main], "Main"), "2\n0\n");
}

#[test]
fn constructor_assigns_through_this() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let point = b.class(
        Modifiers::PUBLIC,
        "Point",
        &[
            b.field(Modifiers::PUBLIC, b.ty("Integer"), "x", None),
            b.field(Modifiers::PUBLIC, b.ty("Integer"), "y", None),
            b.constructor(
                Modifiers::PUBLIC,
                "Point",
                &[b.param(b.ty("Integer"), "x"), b.param(b.ty("Integer"), "y")],
                &[
                    b.expr_stmt(b.assign(b.member(b.this(), "x"), b.var("x"))),
                    b.expr_stmt(b.assign(b.member(b.this(), "y"), b.var("y"))),
                ],
            ),
            b.method(
                Modifiers::PUBLIC,
                Some(b.ty("Integer")),
                "sum",
                &[],
                &[b.ret(Some(b.binary(b.var("x"), BinaryOp::Add, b.var("y"))))],
            ),
        ],
    );
    let main = main_class(
        &b,
        &[
            b.var_decl(
                b.ty("Point"),
                "p",
                Some(b.new_object(b.ty("Point"), &[b.int(2), b.int(3)])),
            ),
            debug(&b, b.method_call(b.var("p"), "sum", &[])),
            debug(&b, b.member(b.var("p"), "x")),
        ],
    );
    assert_eq!(output(&[point, main], "Main"), "5\n2\n");
}

#[test]
fn field_initializers_run_before_the_constructor() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let greeting = b.binary(b.var("greeting"), BinaryOp::Add, b.string(" world"));
    let greeter = b.class(
        Modifiers::PUBLIC,
        "Greeter",
        &[
            b.field(Modifiers::PUBLIC, b.ty("String"), "greeting", Some(b.string("hello"))),
            b.constructor(
                Modifiers::PUBLIC,
                "Greeter",
                &[],
                &[b.expr_stmt(b.assign(b.var("greeting"), greeting))],
            ),
            b.method(
                Modifiers::PUBLIC,
                Some(b.ty("String")),
                "greet",
                &[],
                &[b.ret(Some(b.var("greeting")))],
            ),
        ],
    );
    let main = main_class(
        &b,
        &[debug(
            &b,
            b.method_call(b.new_object(b.ty("Greeter"), &[]), "greet", &[]),
        )],
    );
    assert_eq!(output(&[greeter, main], "Main"), "hello world\n");
}

#[test]
fn overloads_are_selected_by_argument_types() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let describe = |param: &str, text: &str| {
        b.method(
            PUBLIC_STATIC,
            Some(b.ty("String")),
            "describe",
            &[b.param(b.ty(param), "value")],
            &[b.ret(Some(b.string(text)))],
        )
    };
    let pair = b.method(
        PUBLIC_STATIC,
        Some(b.ty("String")),
        "describe",
        &[b.param(b.ty("Integer"), "a"), b.param(b.ty("Integer"), "b")],
        &[b.ret(Some(b.string("pair")))],
    );
    let action = b.method(
        PUBLIC_STATIC,
        None,
        "action",
        &[],
        &[
            debug(&b, b.call("describe", &[b.string("x")])),
            debug(&b, b.call("describe", &[b.int(1)])),
            debug(&b, b.call("describe", &[b.int(1), b.int(2)])),
        ],
    );
    let main = b.class(
        Modifiers::PUBLIC,
        "Main",
        &[describe("Integer", "int"), describe("String", "text"), pair, action],
    );
    assert_eq!(output(&[main], "Main"), "text\nint\npair\n");
}

#[test]
fn equal_parameter_types_beat_an_earlier_object_overload() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let f = |param: &str, text: &str| {
        b.method(
            PUBLIC_STATIC,
            Some(b.ty("String")),
            "f",
            &[b.param(b.ty(param), "value")],
            &[b.ret(Some(b.string(text)))],
        )
    };
    let action = b.method(
        PUBLIC_STATIC,
        None,
        "action",
        &[],
        &[
            debug(&b, b.call("f", &[b.int(1)])),
            debug(&b, b.call("f", &[b.boolean(true)])),
        ],
    );
    let main = b.class(
        Modifiers::PUBLIC,
        "Main",
        &[f("Object", "obj"), f("Integer", "int"), action],
    );
    assert_eq!(output(&[main], "Main"), "int\nobj\n");
}

#[test]
fn subclass_methods_override_through_a_base_parameter() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let speak = b.binary(b.string("says "), BinaryOp::Add, b.call("sound", &[]));
    let animal = b.class(
        Modifiers::PUBLIC | Modifiers::VIRTUAL,
        "Animal",
        &[
            b.method(
                Modifiers::PUBLIC | Modifiers::VIRTUAL,
                Some(b.ty("String")),
                "sound",
                &[],
                &[b.ret(Some(b.string("...")))],
            ),
            b.method(
                Modifiers::PUBLIC,
                Some(b.ty("String")),
                "speak",
                &[],
                &[b.ret(Some(speak))],
            ),
        ],
    );
    let dog = b.subclass(
        Modifiers::PUBLIC,
        "Dog",
        b.ty("Animal"),
        &[b.method(
            Modifiers::PUBLIC | Modifiers::OVERRIDE,
            Some(b.ty("String")),
            "sound",
            &[],
            &[b.ret(Some(b.string("woof")))],
        )],
    );
    let listen = b.method(
        PUBLIC_STATIC,
        Some(b.ty("String")),
        "listen",
        &[b.param(b.ty("Animal"), "animal")],
        &[b.ret(Some(b.method_call(b.var("animal"), "sound", &[])))],
    );
    let action = b.method(
        PUBLIC_STATIC,
        None,
        "action",
        &[],
        &[
            b.var_decl(b.ty("Dog"), "dog", Some(b.new_object(b.ty("Dog"), &[]))),
            debug(&b, b.method_call(b.var("dog"), "speak", &[])),
            debug(&b, b.call("listen", &[b.new_object(b.ty("Animal"), &[])])),
            debug(&b, b.call("listen", &[b.var("dog")])),
        ],
    );
    let main = b.class(Modifiers::PUBLIC, "Main", &[listen, action]);
    assert_eq!(output(&[animal, dog, main], "Main"), "says woof\n...\nwoof\n");
}

#[test]
fn static_fields_are_shared_across_accesses() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let registry = b.class(
        Modifiers::PUBLIC,
        "Registry",
        &[b.field(PUBLIC_STATIC, b.ty("Integer"), "count", Some(b.int(10)))],
    );
    let count = || b.member(b.var("Registry"), "count");
    let main = main_class(
        &b,
        &[
            b.expr_stmt(b.postfix(count(), PostfixOp::PostInc)),
            debug(&b, count()),
        ],
    );
    assert_eq!(output(&[registry, main], "Main"), "11\n");
}

#[test]
fn inner_class_statics_resolve_by_simple_name() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let inner = b.class(
        Modifiers::PUBLIC,
        "Inner",
        &[b.field(PUBLIC_STATIC, b.ty("Integer"), "value", Some(b.int(5)))],
    );
    let outer = b.class(
        Modifiers::PUBLIC,
        "Outer",
        &[
            b.inner(inner),
            b.method(
                PUBLIC_STATIC,
                None,
                "action",
                &[],
                &[debug(&b, b.member(b.var("Inner"), "value"))],
            ),
        ],
    );
    assert_eq!(output(&[outer], "Outer"), "5\n");
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let dive = b.method(
        PUBLIC_STATIC,
        Some(b.ty("Integer")),
        "dive",
        &[b.param(b.ty("Integer"), "n")],
        &[b.ret(Some(b.call(
            "dive",
            &[b.binary(b.var("n"), BinaryOp::Add, b.int(1))],
        )))],
    );
    let action = b.method(
        PUBLIC_STATIC,
        None,
        "action",
        &[],
        &[b.expr_stmt(b.call("dive", &[b.int(0)]))],
    );
    let main = b.class(Modifiers::PUBLIC, "Main", &[dive, action]);

    let engine = Engine::new(EngineConfig::new().with_max_call_depth(16));
    let outcome = execute_with(engine, &[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::CallDepthExceeded { limit: 16 }))
    ));
}
