//! Statement nodes.

use talon_core::Span;

use crate::expr::Expr;
use crate::types::{Ident, TypeRef};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// `expr;`
    Expr(ExprStmt<'ast>),
    /// `Integer a = 1, b;`
    VarDecl(VarDeclStmt<'ast>),
    /// `{ ... }`
    Block(Block<'ast>),
    If(&'ast IfStmt<'ast>),
    While(&'ast WhileStmt<'ast>),
    DoWhile(&'ast DoWhileStmt<'ast>),
    For(&'ast ForStmt<'ast>),
    /// `for (Account a : accounts)`
    Foreach(&'ast ForeachStmt<'ast>),
    Return(ReturnStmt<'ast>),
    Break(BreakStmt),
    Continue(ContinueStmt),
}

impl Stmt<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::VarDecl(s) => s.span,
            Self::Block(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
            Self::DoWhile(s) => s.span,
            Self::For(s) => s.span,
            Self::Foreach(s) => s.span,
            Self::Return(s) => s.span,
            Self::Break(s) => s.span,
            Self::Continue(s) => s.span,
        }
    }
}

/// A braced list of statements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    pub stmts: &'ast [Stmt<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    pub expr: &'ast Expr<'ast>,
    pub span: Span,
}

/// A local variable declaration with one or more declarators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    pub ty: TypeRef<'ast>,
    pub vars: &'ast [VarDeclarator<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclarator<'ast> {
    pub name: Ident<'ast>,
    pub init: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_stmt: &'ast Stmt<'ast>,
    pub else_stmt: Option<&'ast Stmt<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub span: Span,
}

/// `do { ... } while (cond);`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoWhileStmt<'ast> {
    pub body: &'ast Stmt<'ast>,
    pub condition: &'ast Expr<'ast>,
    pub span: Span,
}

/// A C-style `for` loop. Every clause is optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForStmt<'ast> {
    pub init: Option<ForInit<'ast>>,
    pub condition: Option<&'ast Expr<'ast>>,
    pub update: &'ast [Expr<'ast>],
    pub body: &'ast Stmt<'ast>,
    pub span: Span,
}

/// The initializer clause of a `for` loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForInit<'ast> {
    VarDecl(VarDeclStmt<'ast>),
    Exprs(&'ast [Expr<'ast>]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForeachStmt<'ast> {
    /// Element type
    pub ty: TypeRef<'ast>,
    /// Loop variable
    pub var: Ident<'ast>,
    /// Collection being iterated
    pub iterable: &'ast Expr<'ast>,
    pub body: &'ast Stmt<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    pub value: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}
