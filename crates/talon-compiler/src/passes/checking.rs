//! Type Check Pass (Pass 2) - check field initializers and method bodies.
//!
//! Walks every class of the table, class by class and method by method,
//! and collects every error instead of stopping at the first. Native
//! methods are not checked. Checking never changes the class table, so
//! running it twice yields the same errors.

use log::debug;
use talon_core::{CompilationErrors, DataType};
use talon_registry::{ClassDescriptor, ClassTable, FieldDescriptor, MethodBody, MethodDescriptor};

use crate::checker::MethodChecker;
use crate::context::CheckContext;

/// Pass 2: static checking against a complete class table.
#[derive(Clone, Copy)]
pub struct TypeCheckPass<'a, 'ast> {
    classes: &'a ClassTable<'ast>,
}

impl<'a, 'ast> TypeCheckPass<'a, 'ast> {
    pub fn new(classes: &'a ClassTable<'ast>) -> Self {
        Self { classes }
    }

    /// Check every class in the table.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn check_all(&self) -> CompilationErrors {
        let mut errors = CompilationErrors::new();
        for class in self.classes.iter() {
            errors.extend(self.check_class(class));
        }
        errors
    }

    /// Check one class and its inner classes.
    pub fn check_class(&self, class: &ClassDescriptor<'ast>) -> CompilationErrors {
        let mut ctx = CheckContext::new(self.classes, class);

        for field in class.instance_fields.values() {
            check_field(&mut ctx, field);
        }
        for field in class.static_fields.values() {
            check_field(&mut ctx, field);
        }
        for ctor in &class.constructors {
            check_method(&mut ctx, ctor);
        }
        for method in class.instance_methods.all() {
            check_method(&mut ctx, method);
        }
        for method in class.static_methods.all() {
            check_method(&mut ctx, method);
        }

        let mut errors = ctx.into_errors();
        for inner in class.inner_classes.iter() {
            errors.extend(self.check_class(inner));
        }
        errors
    }
}

fn check_field<'a, 'ast>(ctx: &mut CheckContext<'a, 'ast>, field: &FieldDescriptor<'ast>) {
    let declared = ctx.resolve_type(&field.data_type, field.span);
    if let Some(init) = field.init {
        let mut checker = MethodChecker::new(ctx, Some(DataType::void()), field.is_static());
        checker.check_stored(init, declared.as_ref());
    }
}

fn check_method<'a, 'ast>(ctx: &mut CheckContext<'a, 'ast>, method: &MethodDescriptor<'ast>) {
    let body = match method.body {
        MethodBody::Script(block) => Some(block),
        MethodBody::Abstract => None,
        MethodBody::Native(_) => return,
    };

    let before = ctx.error_count();
    let return_type = match &method.return_type {
        Some(ty) => ctx.resolve_type(ty, method.span),
        None => Some(DataType::void()),
    };
    let mut checker = MethodChecker::new(ctx, return_type, method.is_static());
    checker.declare_params(&method.params, method.span);
    if let Some(body) = body {
        checker.check_body(&body);
    }

    debug!(
        "checked {}.{} ({} errors)",
        ctx.class().name,
        method.name,
        ctx.error_count() - before
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::RegistrationPass;
    use bumpalo::Bump;
    use talon_ast::{AssignOp, AstBuilder, BinaryOp, ClassDecl, Stmt, TypeRef, UnaryOp};
    use talon_core::Modifiers;

    const PUBLIC: Modifiers = Modifiers::PUBLIC;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Register `decls` and return the sorted error messages.
    fn check_decls(decls: &[&ClassDecl<'_>]) -> Vec<String> {
        init_logger();
        let mut classes = ClassTable::with_primitives();
        let output = RegistrationPass::new().register_all(decls, &mut classes);
        assert!(output.is_ok(), "registration failed: {:?}", output.errors);

        let mut messages: Vec<String> = TypeCheckPass::new(&classes)
            .check_all()
            .messages()
            .into_iter()
            .map(String::from)
            .collect();
        messages.sort();
        messages
    }

    /// A class `Foo` with a single public `action` method.
    fn action<'ast>(
        b: &AstBuilder<'ast>,
        ret: Option<TypeRef<'ast>>,
        body: &[Stmt<'ast>],
    ) -> &'ast ClassDecl<'ast> {
        b.class(PUBLIC, "Foo", &[b.method(PUBLIC, ret, "action", &[], body)])
    }

    #[test]
    fn clean_class_has_no_errors() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            Some(b.ty("Integer")),
            &[
                b.var_decl(b.ty("Integer"), "i", Some(b.int(1))),
                b.var_decl(b.ty("Double"), "d", Some(b.binary(b.var("i"), BinaryOp::Mul, b.double(2.5)))),
                b.var_decl(b.ty("String"), "s", Some(b.binary(b.string("n="), BinaryOp::Add, b.string("x")))),
                b.if_stmt(
                    b.binary(b.var("i"), BinaryOp::Less, b.int(3)),
                    b.block_stmt(&[b.expr_stmt(b.postfix(b.var("i"), talon_ast::PostfixOp::PostInc))]),
                    None,
                ),
                b.ret(Some(b.var("i"))),
            ],
        );
        assert!(check_decls(&[decl]).is_empty());
    }

    #[test]
    fn non_boolean_conditions() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.if_stmt(b.int(1), b.block_stmt(&[]), None),
                b.while_stmt(b.string("x"), b.block_stmt(&[])),
                b.do_while(b.block_stmt(&[]), b.double(1.5)),
                b.for_stmt(None, Some(b.int(0)), &[], b.block_stmt(&[])),
                b.expr_stmt(b.ternary(b.null(), b.int(1), b.int(2))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "condition <Double> must be Boolean expression",
                "condition <Integer> must be Boolean expression",
                "condition <Integer> must be Boolean expression",
                "condition <String> must be Boolean expression",
                "condition <null> must be Boolean expression",
            ]
        );
    }

    #[test]
    fn return_mismatches() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.method(PUBLIC, Some(b.ty("Integer")), "a", &[], &[b.ret(Some(b.boolean(true)))]),
                b.method(PUBLIC, None, "b", &[], &[b.ret(Some(b.int(1)))]),
                b.method(PUBLIC, Some(b.ty("Integer")), "c", &[], &[b.ret(None)]),
                b.method(PUBLIC, Some(b.ty("Integer")), "d", &[], &[b.ret(Some(b.double(1.0)))]),
                b.method(PUBLIC, Some(b.ty("String")), "e", &[], &[b.ret(Some(b.null()))]),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "return type <Boolean> does not match Integer",
                "return type <Double> does not match Integer",
                "return type <Integer> does not match void",
                "return type <void> does not match Integer",
            ]
        );
    }

    #[test]
    fn break_and_continue_outside_loops() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.brk(),
                b.cont(),
                b.while_stmt(b.boolean(true), b.block_stmt(&[b.brk(), b.cont()])),
                b.if_stmt(b.boolean(true), b.brk(), None),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "break must be in for/while loop",
                "break must be in for/while loop",
                "continue must be in for/while loop",
            ]
        );
    }

    #[test]
    fn declarations_and_assignments_do_not_coerce() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(b.ty("Integer"), "i", Some(b.int(1))),
                b.var_decl(b.ty("String"), "j", Some(b.int(1))),
                b.expr_stmt(b.assign(b.var("i"), b.string("x"))),
                b.var_decl(b.ty("Double"), "d", Some(b.int(2))),
                b.var_decl(b.ty("String"), "n", Some(b.null())),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Integer> does not match <Double>",
                "expression <Integer> does not match <String>",
                "expression <String> does not match <Integer>",
            ]
        );
    }

    #[test]
    fn compound_assignment_uses_arithmetic_rules() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(b.ty("Integer"), "i", Some(b.int(1))),
                b.var_decl(b.ty("String"), "s", Some(b.string(""))),
                b.expr_stmt(b.assign_op(b.var("i"), AssignOp::AddAssign, b.int(2))),
                b.expr_stmt(b.assign_op(b.var("s"), AssignOp::AddAssign, b.string("x"))),
                b.expr_stmt(b.assign_op(b.var("i"), AssignOp::AddAssign, b.double(0.5))),
                b.expr_stmt(b.assign_op(b.var("s"), AssignOp::SubAssign, b.int(1))),
                b.expr_stmt(b.assign(b.int(1), b.int(2))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Double> does not match <Integer>",
                "expression <String> must be Integer or Double",
                "expression is not assignable",
            ]
        );
    }

    #[test]
    fn binary_operand_rules() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.expr_stmt(b.binary(b.int(1), BinaryOp::Add, b.boolean(true))),
                b.expr_stmt(b.binary(b.string("a"), BinaryOp::Add, b.int(1))),
                b.expr_stmt(b.binary(b.string("a"), BinaryOp::Sub, b.int(1))),
                b.expr_stmt(b.binary(b.boolean(true), BinaryOp::Add, b.boolean(true))),
                b.expr_stmt(b.binary(b.int(1), BinaryOp::LogicalAnd, b.boolean(true))),
                b.expr_stmt(b.binary(b.string("a"), BinaryOp::Less, b.string("b"))),
                b.expr_stmt(b.binary(b.int(1), BinaryOp::Equal, b.string("b"))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Boolean> must be Integer, String or Double",
                "expression <Boolean> must be Integer, String or Double",
                "expression <Integer> must be Boolean",
                "expression <String> does not match <Integer>",
                "expression <String> must be Integer or Double",
            ]
        );
    }

    #[test]
    fn unary_operand_rules() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(b.ty("Double"), "d", Some(b.double(1.0))),
                b.expr_stmt(b.unary(UnaryOp::Plus, b.var("d"))),
                b.expr_stmt(b.unary(UnaryOp::PreInc, b.string("s"))),
                b.expr_stmt(b.unary(UnaryOp::Not, b.int(1))),
                b.expr_stmt(b.unary(UnaryOp::Neg, b.int(1))),
                b.expr_stmt(b.unary(UnaryOp::PreInc, b.int(1))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Double> must be Integer",
                "expression <Integer> must be Boolean",
                "expression <String> must be Integer",
                "expression is not assignable",
            ]
        );
    }

    #[test]
    fn index_key_rules() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let list_ty = b.generic_ty("List", &[b.ty("Integer")]);
        let map_ty = b.generic_ty("Map", &[b.ty("String"), b.ty("Integer")]);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(list_ty, "l", Some(b.new_object(list_ty, &[]))),
                b.var_decl(map_ty, "m", Some(b.new_object(map_ty, &[]))),
                b.var_decl(b.ty("Integer"), "a", Some(b.index(b.var("l"), b.int(0)))),
                b.var_decl(b.ty("Integer"), "c", Some(b.index(b.var("m"), b.string("k")))),
                b.expr_stmt(b.index(b.var("l"), b.boolean(true))),
                b.expr_stmt(b.index(b.var("m"), b.int(1))),
                b.expr_stmt(b.index(b.int(5), b.int(1))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Integer> must be List or Map",
                "list key <Boolean> must be Integer",
                "map key <Integer> must be String",
            ]
        );
    }

    #[test]
    fn explicit_receivers_cannot_reach_hidden_methods() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let foo = b.class(
            PUBLIC,
            "Foo",
            &[
                b.method(Modifiers::PRIVATE, None, "secret", &[], &[]),
                b.method(Modifiers::PROTECTED, None, "prot", &[], &[]),
                b.method(Modifiers::PRIVATE | Modifiers::STATIC, None, "hidden", &[], &[]),
                b.method(
                    PUBLIC,
                    None,
                    "action",
                    &[],
                    &[
                        b.expr_stmt(b.call("secret", &[])),
                        b.expr_stmt(b.method_call(b.this(), "prot", &[])),
                        b.expr_stmt(b.method_call(b.var("Foo"), "hidden", &[])),
                        b.expr_stmt(b.method_call(b.new_object(b.ty("Foo"), &[]), "prot", &[])),
                    ],
                ),
            ],
        );
        let bar = b.class(
            PUBLIC,
            "Bar",
            &[b.method(
                PUBLIC,
                None,
                "action",
                &[],
                &[
                    b.expr_stmt(b.method_call(b.var("Foo"), "hidden", &[])),
                    b.var_decl(b.ty("Foo"), "f", Some(b.new_object(b.ty("Foo"), &[]))),
                    b.expr_stmt(b.method_call(b.var("f"), "secret", &[])),
                ],
            )],
        );
        assert_eq!(
            check_decls(&[foo, bar]),
            vec![
                "Method access modifier must be public but private",
                "Method access modifier must be public but private",
                "Method access modifier must be public but protected",
            ]
        );
    }

    #[test]
    fn unresolved_names_do_not_cascade() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(
            &b,
            None,
            &[
                b.expr_stmt(b.binary(b.var("missing"), BinaryOp::Sub, b.string("x"))),
                b.expr_stmt(b.call("nothing", &[])),
                b.expr_stmt(b.member(b.this(), "nowhere")),
                b.var_decl(b.ty("Widget"), "w", None),
                b.expr_stmt(b.method_call(b.var("w"), "spin", &[])),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "field nowhere is not defined",
                "method nothing is not defined",
                "type Widget is not defined",
                "variable missing is not defined",
            ]
        );
    }

    #[test]
    fn generic_container_calls_use_element_types() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let list_ty = b.generic_ty("List", &[b.ty("Integer")]);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(list_ty, "l", Some(b.new_object(list_ty, &[]))),
                b.expr_stmt(b.method_call(b.var("l"), "add", &[b.int(1)])),
                b.var_decl(b.ty("Integer"), "x", Some(b.method_call(b.var("l"), "get", &[b.int(0)]))),
                b.var_decl(b.ty("String"), "s", Some(b.method_call(b.var("l"), "get", &[b.int(0)]))),
                b.var_decl(b.ty("Integer"), "n", Some(b.method_call(b.var("l"), "size", &[]))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec!["expression <Integer> does not match <String>"]
        );
    }

    #[test]
    fn overloads_resolve_by_argument_type() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.method(PUBLIC, Some(b.ty("Integer")), "bar", &[b.param(b.ty("Integer"), "a")], &[b.ret(Some(b.var("a")))]),
                b.method(PUBLIC, Some(b.ty("String")), "bar", &[b.param(b.ty("String"), "a")], &[b.ret(Some(b.var("a")))]),
                b.method(
                    PUBLIC,
                    None,
                    "action",
                    &[],
                    &[
                        b.var_decl(b.ty("Integer"), "i", Some(b.call("bar", &[b.int(1)]))),
                        b.var_decl(b.ty("String"), "s", Some(b.call("bar", &[b.string("x")]))),
                        b.expr_stmt(b.call("bar", &[b.int(1), b.int(2)])),
                    ],
                ),
            ],
        );
        assert_eq!(check_decls(&[decl]), vec!["method bar expects 1 arguments but got 2"]);
    }

    #[test]
    fn equal_parameter_types_win_over_an_earlier_object_overload() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.method(PUBLIC, Some(b.ty("String")), "f", &[b.param(b.ty("Object"), "o")], &[b.ret(Some(b.string("obj")))]),
                b.method(PUBLIC, Some(b.ty("Integer")), "f", &[b.param(b.ty("Integer"), "a")], &[b.ret(Some(b.var("a")))]),
                b.method(
                    PUBLIC,
                    None,
                    "action",
                    &[],
                    &[
                        b.var_decl(b.ty("Integer"), "i", Some(b.call("f", &[b.int(1)]))),
                        b.var_decl(b.ty("String"), "s", Some(b.call("f", &[b.boolean(true)]))),
                    ],
                ),
            ],
        );
        assert!(check_decls(&[decl]).is_empty());
    }

    #[test]
    fn declarations_assignments_and_returns_do_not_widen_to_object() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.method(PUBLIC, Some(b.ty("Object")), "g", &[], &[b.ret(Some(b.int(1)))]),
                b.method(
                    PUBLIC,
                    None,
                    "action",
                    &[],
                    &[
                        b.var_decl(b.ty("Object"), "o", Some(b.int(2))),
                        b.expr_stmt(b.assign(b.var("o"), b.string("x"))),
                        b.var_decl(b.ty("Object"), "n", Some(b.null())),
                    ],
                ),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <Integer> does not match <Object>",
                "expression <String> does not match <Object>",
                "return type <Integer> does not match Object",
            ]
        );
    }

    #[test]
    fn static_methods_have_no_instance() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.field(PUBLIC, b.ty("Integer"), "count", None),
                b.field(PUBLIC | Modifiers::STATIC, b.ty("Integer"), "total", Some(b.int(0))),
                b.method(PUBLIC | Modifiers::STATIC, None, "run", &[], &[
                    b.expr_stmt(b.var("count")),
                    b.expr_stmt(b.this()),
                    b.expr_stmt(b.assign(b.var("total"), b.int(1))),
                ]),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "count cannot be referenced from a static context",
                "this cannot be referenced from a static context",
            ]
        );
    }

    #[test]
    fn field_initializers_are_checked() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[
                b.field(PUBLIC, b.ty("Integer"), "a", Some(b.string("x"))),
                b.field(PUBLIC, b.ty("Integer"), "b", Some(b.int(1))),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec!["expression <String> does not match <Integer>"]
        );
    }

    #[test]
    fn foreach_requires_a_list() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let list_ty = b.generic_ty("List", &[b.ty("String")]);
        let decl = action(
            &b,
            None,
            &[
                b.var_decl(list_ty, "names", Some(b.new_object(list_ty, &[]))),
                b.foreach(b.ty("String"), "n", b.var("names"), b.block_stmt(&[b.brk()])),
                b.foreach(b.ty("Integer"), "n", b.var("names"), b.block_stmt(&[])),
                b.foreach(b.ty("Integer"), "n", b.int(3), b.block_stmt(&[])),
            ],
        );
        assert_eq!(
            check_decls(&[decl]),
            vec![
                "expression <String> does not match <Integer>",
                "loop collection <Integer> must be List",
            ]
        );
    }

    #[test]
    fn redeclaring_a_local_in_one_block() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = b.class(
            PUBLIC,
            "Foo",
            &[b.method(
                PUBLIC,
                None,
                "action",
                &[b.param(b.ty("Integer"), "a")],
                &[
                    b.var_decl(b.ty("Integer"), "a", None),
                    b.block_stmt(&[b.var_decl(b.ty("String"), "b", None)]),
                    b.var_decl(b.ty("String"), "b", None),
                ],
            )],
        );
        assert_eq!(check_decls(&[decl]), vec!["variable a is already defined"]);
    }

    #[test]
    fn checking_twice_gives_the_same_errors() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let decl = action(&b, None, &[b.if_stmt(b.int(1), b.block_stmt(&[]), None)]);

        let mut classes = ClassTable::with_primitives();
        RegistrationPass::new().register_into(decl, &mut classes).expect("registers");
        let pass = TypeCheckPass::new(&classes);
        let first = pass.check_all();
        let second = pass.check_all();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn inner_classes_are_checked() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let inner = b.class(
            PUBLIC,
            "Inner",
            &[b.method(PUBLIC, None, "go", &[], &[b.if_stmt(b.string("x"), b.block_stmt(&[]), None)])],
        );
        let outer = b.class(
            PUBLIC,
            "Outer",
            &[
                b.inner(inner),
                b.method(PUBLIC, None, "action", &[], &[
                    b.var_decl(b.ty("Inner"), "i", Some(b.new_object(b.ty("Inner"), &[]))),
                    b.expr_stmt(b.method_call(b.var("i"), "go", &[])),
                ]),
            ],
        );
        assert_eq!(
            check_decls(&[outer]),
            vec!["condition <String> must be Boolean expression"]
        );
    }
}
