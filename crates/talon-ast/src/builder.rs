//! Programmatic AST construction.
//!
//! [`AstBuilder`] allocates nodes into an arena and stamps them with the
//! current line, set through [`AstBuilder::at`]. It is how hosts without a
//! parser (and the test suites) produce class declarations.

use std::cell::Cell;

use bumpalo::Bump;
use talon_core::{Modifiers, Span};

use crate::decl::{ClassDecl, ClassMember, FieldDecl, MethodDecl, Param};
use crate::expr::{
    AssignExpr, BinaryExpr, CallExpr, Expr, IndexExpr, LiteralExpr, LiteralKind, MemberExpr,
    NewExpr, PostfixExpr, QueryExpr, TernaryExpr, UnaryExpr,
};
use crate::ops::{AssignOp, BinaryOp, PostfixOp, UnaryOp};
use crate::stmt::{
    Block, BreakStmt, ContinueStmt, DoWhileStmt, ExprStmt, ForInit, ForStmt, ForeachStmt, IfStmt,
    ReturnStmt, Stmt, VarDeclStmt, VarDeclarator, WhileStmt,
};
use crate::types::{Ident, TypeRef};

/// Arena-backed node factory.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            line: Cell::new(1),
        }
    }

    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    /// Stamp subsequently built nodes with `line`.
    pub fn at(&self, line: u32) -> &Self {
        self.line.set(line);
        self
    }

    fn span(&self) -> Span {
        Span::point(self.line.get(), 1)
    }

    fn slice<T: Copy>(&self, items: &[T]) -> &'ast [T] {
        self.arena.alloc_slice_copy(items)
    }

    fn boxed<T>(&self, value: T) -> &'ast T {
        self.arena.alloc(value)
    }

    // ------------------------------------------------------------------
    // Names and types
    // ------------------------------------------------------------------

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.arena.alloc_str(name), self.span())
    }

    pub fn ty(&self, name: &str) -> TypeRef<'ast> {
        self.generic_ty(name, &[])
    }

    pub fn generic_ty(&self, name: &str, args: &[TypeRef<'ast>]) -> TypeRef<'ast> {
        TypeRef {
            name: self.ident(name),
            args: self.slice(args),
            span: self.span(),
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn literal(&self, kind: LiteralKind<'ast>) -> Expr<'ast> {
        Expr::Literal(LiteralExpr {
            kind,
            span: self.span(),
        })
    }

    pub fn int(&self, value: i64) -> Expr<'ast> {
        self.literal(LiteralKind::Integer(value))
    }

    pub fn double(&self, value: f64) -> Expr<'ast> {
        self.literal(LiteralKind::Double(value))
    }

    pub fn boolean(&self, value: bool) -> Expr<'ast> {
        self.literal(LiteralKind::Boolean(value))
    }

    pub fn string(&self, value: &str) -> Expr<'ast> {
        self.literal(LiteralKind::String(self.arena.alloc_str(value)))
    }

    pub fn null(&self) -> Expr<'ast> {
        self.literal(LiteralKind::Null)
    }

    pub fn var(&self, name: &str) -> Expr<'ast> {
        Expr::Ident(self.ident(name))
    }

    pub fn this(&self) -> Expr<'ast> {
        Expr::This(self.span())
    }

    pub fn member(&self, object: Expr<'ast>, name: &str) -> Expr<'ast> {
        Expr::Member(self.boxed(MemberExpr {
            object: self.boxed(object),
            member: self.ident(name),
            span: self.span(),
        }))
    }

    pub fn binary(&self, left: Expr<'ast>, op: BinaryOp, right: Expr<'ast>) -> Expr<'ast> {
        Expr::Binary(self.boxed(BinaryExpr {
            left: self.boxed(left),
            op,
            right: self.boxed(right),
            span: self.span(),
        }))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr<'ast>) -> Expr<'ast> {
        Expr::Unary(self.boxed(UnaryExpr {
            op,
            operand: self.boxed(operand),
            span: self.span(),
        }))
    }

    pub fn postfix(&self, operand: Expr<'ast>, op: PostfixOp) -> Expr<'ast> {
        Expr::Postfix(self.boxed(PostfixExpr {
            operand: self.boxed(operand),
            op,
            span: self.span(),
        }))
    }

    pub fn assign(&self, target: Expr<'ast>, value: Expr<'ast>) -> Expr<'ast> {
        self.assign_op(target, AssignOp::Assign, value)
    }

    pub fn assign_op(&self, target: Expr<'ast>, op: AssignOp, value: Expr<'ast>) -> Expr<'ast> {
        Expr::Assign(self.boxed(AssignExpr {
            target: self.boxed(target),
            op,
            value: self.boxed(value),
            span: self.span(),
        }))
    }

    pub fn ternary(
        &self,
        condition: Expr<'ast>,
        then_expr: Expr<'ast>,
        else_expr: Expr<'ast>,
    ) -> Expr<'ast> {
        Expr::Ternary(self.boxed(TernaryExpr {
            condition: self.boxed(condition),
            then_expr: self.boxed(then_expr),
            else_expr: self.boxed(else_expr),
            span: self.span(),
        }))
    }

    /// Call on the implicit receiver.
    pub fn call(&self, method: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Call(self.boxed(CallExpr {
            receiver: None,
            method: self.ident(method),
            args: self.slice(args),
            span: self.span(),
        }))
    }

    /// Call through an explicit receiver (`receiver.method(args)`).
    pub fn method_call(&self, receiver: Expr<'ast>, method: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::Call(self.boxed(CallExpr {
            receiver: Some(self.boxed(receiver)),
            method: self.ident(method),
            args: self.slice(args),
            span: self.span(),
        }))
    }

    pub fn new_object(&self, ty: TypeRef<'ast>, args: &[Expr<'ast>]) -> Expr<'ast> {
        Expr::New(self.boxed(NewExpr {
            ty,
            args: self.slice(args),
            span: self.span(),
        }))
    }

    pub fn index(&self, object: Expr<'ast>, index: Expr<'ast>) -> Expr<'ast> {
        Expr::Index(self.boxed(IndexExpr {
            object: self.boxed(object),
            index: self.boxed(index),
            span: self.span(),
        }))
    }

    pub fn query(&self, query: &str) -> Expr<'ast> {
        Expr::Query(QueryExpr {
            query: self.arena.alloc_str(query),
            span: self.span(),
        })
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr: self.boxed(expr),
            span: self.span(),
        })
    }

    /// Single-variable declaration.
    pub fn var_decl(&self, ty: TypeRef<'ast>, name: &str, init: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::VarDecl(self.var_decl_stmt(ty, &[(name, init)]))
    }

    /// Declaration with several declarators sharing one type.
    pub fn var_decl_multi(
        &self,
        ty: TypeRef<'ast>,
        vars: &[(&str, Option<Expr<'ast>>)],
    ) -> Stmt<'ast> {
        Stmt::VarDecl(self.var_decl_stmt(ty, vars))
    }

    fn var_decl_stmt(
        &self,
        ty: TypeRef<'ast>,
        vars: &[(&str, Option<Expr<'ast>>)],
    ) -> VarDeclStmt<'ast> {
        let declarators: Vec<VarDeclarator<'ast>> = vars
            .iter()
            .map(|(name, init)| VarDeclarator {
                name: self.ident(name),
                init: init.map(|e| self.boxed(e)),
                span: self.span(),
            })
            .collect();
        VarDeclStmt {
            ty,
            vars: self.slice(&declarators),
            span: self.span(),
        }
    }

    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Block<'ast> {
        Block {
            stmts: self.slice(stmts),
            span: self.span(),
        }
    }

    pub fn block_stmt(&self, stmts: &[Stmt<'ast>]) -> Stmt<'ast> {
        Stmt::Block(self.block(stmts))
    }

    pub fn if_stmt(
        &self,
        condition: Expr<'ast>,
        then_stmt: Stmt<'ast>,
        else_stmt: Option<Stmt<'ast>>,
    ) -> Stmt<'ast> {
        Stmt::If(self.boxed(IfStmt {
            condition: self.boxed(condition),
            then_stmt: self.boxed(then_stmt),
            else_stmt: else_stmt.map(|s| self.boxed(s)),
            span: self.span(),
        }))
    }

    pub fn while_stmt(&self, condition: Expr<'ast>, body: Stmt<'ast>) -> Stmt<'ast> {
        Stmt::While(self.boxed(WhileStmt {
            condition: self.boxed(condition),
            body: self.boxed(body),
            span: self.span(),
        }))
    }

    pub fn do_while(&self, body: Stmt<'ast>, condition: Expr<'ast>) -> Stmt<'ast> {
        Stmt::DoWhile(self.boxed(DoWhileStmt {
            body: self.boxed(body),
            condition: self.boxed(condition),
            span: self.span(),
        }))
    }

    pub fn for_stmt(
        &self,
        init: Option<ForInit<'ast>>,
        condition: Option<Expr<'ast>>,
        update: &[Expr<'ast>],
        body: Stmt<'ast>,
    ) -> Stmt<'ast> {
        Stmt::For(self.boxed(ForStmt {
            init,
            condition: condition.map(|e| self.boxed(e)),
            update: self.slice(update),
            body: self.boxed(body),
            span: self.span(),
        }))
    }

    /// `for (Type name = init; ...)` initializer.
    pub fn for_var(&self, ty: TypeRef<'ast>, name: &str, init: Expr<'ast>) -> ForInit<'ast> {
        ForInit::VarDecl(self.var_decl_stmt(ty, &[(name, Some(init))]))
    }

    pub fn foreach(
        &self,
        ty: TypeRef<'ast>,
        var: &str,
        iterable: Expr<'ast>,
        body: Stmt<'ast>,
    ) -> Stmt<'ast> {
        Stmt::Foreach(self.boxed(ForeachStmt {
            ty,
            var: self.ident(var),
            iterable: self.boxed(iterable),
            body: self.boxed(body),
            span: self.span(),
        }))
    }

    pub fn ret(&self, value: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            value: value.map(|e| self.boxed(e)),
            span: self.span(),
        })
    }

    pub fn brk(&self) -> Stmt<'ast> {
        Stmt::Break(BreakStmt { span: self.span() })
    }

    pub fn cont(&self) -> Stmt<'ast> {
        Stmt::Continue(ContinueStmt { span: self.span() })
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    pub fn param(&self, ty: TypeRef<'ast>, name: &str) -> Param<'ast> {
        Param {
            ty,
            name: self.ident(name),
            span: self.span(),
        }
    }

    pub fn method(
        &self,
        modifiers: Modifiers,
        return_type: Option<TypeRef<'ast>>,
        name: &str,
        params: &[Param<'ast>],
        body: &[Stmt<'ast>],
    ) -> ClassMember<'ast> {
        ClassMember::Method(self.method_decl(modifiers, return_type, name, params, Some(body)))
    }

    /// A method without a body.
    pub fn abstract_method(
        &self,
        modifiers: Modifiers,
        return_type: Option<TypeRef<'ast>>,
        name: &str,
        params: &[Param<'ast>],
    ) -> ClassMember<'ast> {
        ClassMember::Method(self.method_decl(
            modifiers | Modifiers::ABSTRACT,
            return_type,
            name,
            params,
            None,
        ))
    }

    pub fn constructor(
        &self,
        modifiers: Modifiers,
        name: &str,
        params: &[Param<'ast>],
        body: &[Stmt<'ast>],
    ) -> ClassMember<'ast> {
        ClassMember::Constructor(self.method_decl(modifiers, None, name, params, Some(body)))
    }

    fn method_decl(
        &self,
        modifiers: Modifiers,
        return_type: Option<TypeRef<'ast>>,
        name: &str,
        params: &[Param<'ast>],
        body: Option<&[Stmt<'ast>]>,
    ) -> &'ast MethodDecl<'ast> {
        self.boxed(MethodDecl {
            modifiers,
            return_type,
            name: self.ident(name),
            params: self.slice(params),
            body: body.map(|stmts| self.block(stmts)),
            span: self.span(),
        })
    }

    pub fn field(
        &self,
        modifiers: Modifiers,
        ty: TypeRef<'ast>,
        name: &str,
        init: Option<Expr<'ast>>,
    ) -> ClassMember<'ast> {
        ClassMember::Field(self.boxed(FieldDecl {
            modifiers,
            ty,
            name: self.ident(name),
            init: init.map(|e| self.boxed(e)),
            span: self.span(),
        }))
    }

    pub fn class(
        &self,
        modifiers: Modifiers,
        name: &str,
        members: &[ClassMember<'ast>],
    ) -> &'ast ClassDecl<'ast> {
        self.class_decl(modifiers, name, None, members)
    }

    pub fn subclass(
        &self,
        modifiers: Modifiers,
        name: &str,
        super_class: TypeRef<'ast>,
        members: &[ClassMember<'ast>],
    ) -> &'ast ClassDecl<'ast> {
        self.class_decl(modifiers, name, Some(super_class), members)
    }

    fn class_decl(
        &self,
        modifiers: Modifiers,
        name: &str,
        super_class: Option<TypeRef<'ast>>,
        members: &[ClassMember<'ast>],
    ) -> &'ast ClassDecl<'ast> {
        self.boxed(ClassDecl {
            modifiers,
            annotations: &[],
            name: self.ident(name),
            super_class,
            interfaces: &[],
            members: self.slice(members),
            span: self.span(),
        })
    }

    /// Wrap a class as a nested member of another class.
    pub fn inner(&self, class: &'ast ClassDecl<'ast>) -> ClassMember<'ast> {
        ClassMember::Class(class)
    }
}
