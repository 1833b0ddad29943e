use bumpalo::Bump;
use talon_ast::{AssignOp, AstBuilder, BinaryOp, PostfixOp};
use talon_core::Modifiers;

use super::common::{PUBLIC_STATIC, debug, main_class, output};

#[test]
fn for_loop_sums_a_range() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "total", Some(b.int(0))),
            b.for_stmt(
                Some(b.for_var(b.ty("Integer"), "i", b.int(0))),
                Some(b.binary(b.var("i"), BinaryOp::Less, b.int(5))),
                &[b.postfix(b.var("i"), PostfixOp::PostInc)],
                b.expr_stmt(b.assign_op(b.var("total"), AssignOp::AddAssign, b.var("i"))),
            ),
            debug(&b, b.var("total")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "10\n");
}

#[test]
fn continue_skips_to_the_update() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let is_even = b.binary(
        b.binary(b.var("i"), BinaryOp::Mod, b.int(2)),
        BinaryOp::Equal,
        b.int(0),
    );
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "odd", Some(b.int(0))),
            b.for_stmt(
                Some(b.for_var(b.ty("Integer"), "i", b.int(0))),
                Some(b.binary(b.var("i"), BinaryOp::Less, b.int(6))),
                &[b.postfix(b.var("i"), PostfixOp::PostInc)],
                b.block_stmt(&[
                    b.if_stmt(is_even, b.cont(), None),
                    b.expr_stmt(b.assign_op(b.var("odd"), AssignOp::AddAssign, b.var("i"))),
                ]),
            ),
            debug(&b, b.var("odd")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "9\n");
}

#[test]
fn break_leaves_an_endless_while() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "n", Some(b.int(0))),
            b.while_stmt(
                b.boolean(true),
                b.block_stmt(&[
                    b.if_stmt(b.binary(b.var("n"), BinaryOp::Equal, b.int(4)), b.brk(), None),
                    b.expr_stmt(b.postfix(b.var("n"), PostfixOp::PostInc)),
                ]),
            ),
            debug(&b, b.var("n")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "4\n");
}

#[test]
fn do_while_runs_the_body_first() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "n", Some(b.int(10))),
            b.do_while(
                b.block_stmt(&[b.expr_stmt(b.postfix(b.var("n"), PostfixOp::PostInc))]),
                b.binary(b.var("n"), BinaryOp::Less, b.int(3)),
            ),
            debug(&b, b.var("n")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "11\n");
}

#[test]
fn return_inside_a_loop_leaves_the_method() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let square = b.binary(b.var("i"), BinaryOp::Mul, b.var("i"));
    let first_over = b.method(
        PUBLIC_STATIC,
        Some(b.ty("Integer")),
        "firstOver",
        &[b.param(b.ty("Integer"), "limit")],
        &[
            b.for_stmt(
                Some(b.for_var(b.ty("Integer"), "i", b.int(0))),
                None,
                &[b.postfix(b.var("i"), PostfixOp::PostInc)],
                b.if_stmt(
                    b.binary(square, BinaryOp::Greater, b.var("limit")),
                    b.ret(Some(b.var("i"))),
                    None,
                ),
            ),
            b.ret(Some(b.int(-1))),
        ],
    );
    let action = b.method(
        PUBLIC_STATIC,
        None,
        "action",
        &[],
        &[debug(&b, b.call("firstOver", &[b.int(10)]))],
    );
    let main = b.class(Modifiers::PUBLIC, "Main", &[first_over, action]);
    assert_eq!(output(&[main], "Main"), "4\n");
}

#[test]
fn if_else_and_ternary_pick_a_branch() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let big = b.binary(b.var("n"), BinaryOp::Greater, b.int(2));
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "n", Some(b.int(3))),
            b.if_stmt(
                b.binary(b.var("n"), BinaryOp::Less, b.int(0)),
                debug(&b, b.string("negative")),
                Some(debug(&b, b.string("positive"))),
            ),
            debug(&b, b.ternary(big, b.string("big"), b.string("small"))),
        ],
    );
    assert_eq!(output(&[main], "Main"), "positive\nbig\n");
}

#[test]
fn logical_operators_short_circuit() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let crash = b.binary(
        b.binary(b.int(1), BinaryOp::Div, b.int(0)),
        BinaryOp::Equal,
        b.int(1),
    );
    let crash_again = b.binary(
        b.binary(b.int(1), BinaryOp::Div, b.int(0)),
        BinaryOp::Equal,
        b.int(1),
    );
    let main = main_class(
        &b,
        &[
            debug(&b, b.binary(b.boolean(false), BinaryOp::LogicalAnd, crash)),
            debug(&b, b.binary(b.boolean(true), BinaryOp::LogicalOr, crash_again)),
        ],
    );
    assert_eq!(output(&[main], "Main"), "false\ntrue\n");
}

#[test]
fn block_locals_do_not_leak() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let main = main_class(
        &b,
        &[
            b.var_decl(b.ty("Integer"), "n", Some(b.int(1))),
            b.block_stmt(&[
                b.var_decl(b.ty("Integer"), "m", Some(b.int(5))),
                b.expr_stmt(b.assign(b.var("n"), b.var("m"))),
            ]),
            b.block_stmt(&[b.var_decl(b.ty("Integer"), "m", Some(b.int(7)))]),
            debug(&b, b.var("n")),
        ],
    );
    assert_eq!(output(&[main], "Main"), "5\n");
}
