use bumpalo::Bump;
use talon::{
    Engine, EngineConfig, NativeError, QueryCredentials, QueryRow, RuntimeError, TalonError,
};
use talon_ast::{AssignOp, AstBuilder};
use talon_core::Modifiers;
use talon_modules::InMemoryQueryExecutor;

use super::common::{PUBLIC_STATIC, action, debug, execute_with, main_class, output};

#[test]
fn lists_grow_index_and_iterate() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let list_ty = || b.generic_ty("List", &[b.ty("Integer")]);
    let items = || b.var("items");
    let main = main_class(
        &b,
        &[
            b.var_decl(list_ty(), "items", Some(b.new_object(list_ty(), &[]))),
            b.expr_stmt(b.method_call(items(), "add", &[b.int(3)])),
            b.expr_stmt(b.method_call(items(), "add", &[b.int(4)])),
            b.expr_stmt(b.assign(b.index(items(), b.int(0)), b.int(5))),
            b.var_decl(b.ty("Integer"), "total", Some(b.int(0))),
            b.foreach(
                b.ty("Integer"),
                "n",
                items(),
                b.expr_stmt(b.assign_op(b.var("total"), AssignOp::AddAssign, b.var("n"))),
            ),
            debug(&b, b.method_call(items(), "size", &[])),
            debug(&b, b.index(items(), b.int(1))),
            debug(&b, b.var("total")),
            debug(&b, items()),
        ],
    );
    assert_eq!(output(&[main], "Main"), "2\n4\n9\n(5, 4)\n");
}

#[test]
fn list_index_past_the_end_fails() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let list_ty = || b.generic_ty("List", &[b.ty("String")]);
    let main = main_class(
        &b,
        &[
            b.var_decl(list_ty(), "items", Some(b.new_object(list_ty(), &[]))),
            debug(&b, b.index(b.var("items"), b.int(2))),
        ],
    );
    let outcome = execute_with(Engine::new(EngineConfig::new()), &[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::IndexOutOfBounds { index: 2, len: 0, .. }))
    ));
}

#[test]
fn string_list_indexes_name_integer_positions() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let list_ty = || b.generic_ty("List", &[b.ty("Integer")]);
    let items = || b.var("items");
    let main = main_class(
        &b,
        &[
            b.var_decl(list_ty(), "items", Some(b.new_object(list_ty(), &[]))),
            b.expr_stmt(b.method_call(items(), "add", &[b.int(7)])),
            debug(&b, b.index(items(), b.string("0"))),
            debug(&b, b.index(items(), b.string("x"))),
        ],
    );
    let outcome = execute_with(Engine::new(EngineConfig::new()), &[main], "Main");
    assert_eq!(outcome.output, "7\n");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::InvalidListIndex { ref key, .. })) if key == "x"
    ));
}

#[test]
fn list_store_fails_when_the_value_empties_the_list() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let list_ty = || b.generic_ty("List", &[b.ty("Integer")]);
    let drain = b.method(
        PUBLIC_STATIC,
        Some(b.ty("Integer")),
        "drain",
        &[b.param(list_ty(), "values")],
        &[
            b.expr_stmt(b.method_call(b.var("values"), "clear", &[])),
            b.ret(Some(b.int(1))),
        ],
    );
    let items = || b.var("items");
    let body = [
        b.var_decl(list_ty(), "items", Some(b.new_object(list_ty(), &[]))),
        b.expr_stmt(b.method_call(items(), "add", &[b.int(5)])),
        b.expr_stmt(b.assign(b.index(items(), b.int(0)), b.call("drain", &[items()]))),
        debug(&b, items()),
    ];
    let main = b.class(Modifiers::PUBLIC, "Main", &[drain, action(&b, &body)]);
    let outcome = execute_with(Engine::new(EngineConfig::new()), &[main], "Main");
    assert_eq!(outcome.output, "");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::IndexOutOfBounds { index: 0, len: 0, .. }))
    ));
}

#[test]
fn maps_store_through_put_and_index() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let map_ty = || b.generic_ty("Map", &[b.ty("String"), b.ty("Integer")]);
    let ages = || b.var("ages");
    let main = main_class(
        &b,
        &[
            b.var_decl(map_ty(), "ages", Some(b.new_object(map_ty(), &[]))),
            b.expr_stmt(b.method_call(ages(), "put", &[b.string("ann"), b.int(30)])),
            b.expr_stmt(b.assign(b.index(ages(), b.string("bob")), b.int(40))),
            debug(&b, b.method_call(ages(), "get", &[b.string("bob")])),
            debug(&b, b.index(ages(), b.string("ann"))),
            debug(&b, b.method_call(ages(), "size", &[])),
            debug(&b, b.method_call(ages(), "containsKey", &[b.string("zed")])),
            debug(&b, b.method_call(ages(), "get", &[b.string("zed")])),
        ],
    );
    assert_eq!(output(&[main], "Main"), "40\n30\n2\nfalse\nnull\n");
}

#[test]
fn dates_are_built_and_formatted() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let new_date = b.method_call(
        b.var("Date"),
        "newInstance",
        &[b.int(2024), b.int(3), b.int(7)],
    );
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Date"), "d", Some(new_date)),
            debug(&b, b.method_call(b.var("d"), "format", &[])),
            debug(&b, b.method_call(b.var("d"), "month", &[])),
            debug(&b, b.var("d")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "2024/03/07\n3\n2024-03-07\n");
}

#[test]
fn http_requests_describe_themselves() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let req = || b.var("req");
    let main = main_class(
        &b,
        &[
            b.var_decl(
                b.ty("HttpRequest"),
                "req",
                Some(b.new_object(b.ty("HttpRequest"), &[])),
            ),
            debug(&b, req()),
            b.expr_stmt(b.method_call(req(), "setEndpoint", &[b.string("/x")])),
            b.expr_stmt(b.method_call(req(), "setMethod", &[b.string("GET")])),
            debug(&b, req()),
            debug(&b, b.method_call(req(), "getMethod", &[])),
        ],
    );
    assert_eq!(
        output(&[main], "Main"),
        "System.HttpRequest[Endpoint=null, Method=null]\n\
         System.HttpRequest[Endpoint=/x, Method=GET]\n\
         GET\n"
    );
}

fn accounts() -> InMemoryQueryExecutor {
    InMemoryQueryExecutor::default()
        .with_row(QueryRow::new("001").with_field("Name", "Acme"))
        .with_row(QueryRow::new("002").with_field("Name", "Globex"))
}

#[test]
fn inline_queries_yield_account_rows() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[b.foreach(
            b.ty("Account"),
            "a",
            b.query("SELECT Id, Name FROM Account"),
            debug(&b, b.member(b.var("a"), "Name")),
        )],
    );

    let config = EngineConfig::new()
        .with_credentials(QueryCredentials::new("user", "secret", "https://db.example"));
    let mut engine = Engine::new(config);
    engine.set_query_executor(accounts());
    let outcome = execute_with(engine, &[main], "Main");
    assert!(outcome.result.is_ok(), "{:?}", outcome.result);
    assert_eq!(outcome.output, "Acme\nGlobex\n");
}

#[test]
fn queries_without_credentials_fail() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[b.var_decl(
            b.generic_ty("List", &[b.ty("Account")]),
            "rows",
            Some(b.query("SELECT Id FROM Account")),
        )],
    );

    let mut engine = Engine::new(EngineConfig::new());
    engine.set_query_executor(accounts());
    let outcome = execute_with(engine, &[main], "Main");
    assert!(matches!(
        outcome.result,
        Err(TalonError::Runtime(RuntimeError::Native(
            NativeError::MissingCredentials { .. }
        )))
    ));
}
