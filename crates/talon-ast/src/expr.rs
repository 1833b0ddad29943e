//! Expression nodes.
//!
//! Names are resolved late: an [`Expr::Ident`] may name a local variable, a
//! field of the enclosing class or a class (as the receiver of a static
//! call or static field access). The checker and the interpreter apply the
//! same order: locals, then fields, then classes.

use talon_core::Span;

use crate::ops::{AssignOp, BinaryOp, PostfixOp, UnaryOp};
use crate::types::{Ident, TypeRef};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    Literal(LiteralExpr<'ast>),
    /// Bare name
    Ident(Ident<'ast>),
    /// `this`
    This(Span),
    /// `object.field`
    Member(&'ast MemberExpr<'ast>),
    /// `name(args)` or `receiver.name(args)`
    Call(&'ast CallExpr<'ast>),
    /// `new Type(args)`
    New(&'ast NewExpr<'ast>),
    /// `object[index]`
    Index(&'ast IndexExpr<'ast>),
    Binary(&'ast BinaryExpr<'ast>),
    Unary(&'ast UnaryExpr<'ast>),
    Postfix(&'ast PostfixExpr<'ast>),
    Assign(&'ast AssignExpr<'ast>),
    /// `cond ? a : b`
    Ternary(&'ast TernaryExpr<'ast>),
    /// `[SELECT ...]`
    Query(QueryExpr<'ast>),
}

impl Expr<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::This(span) => *span,
            Self::Member(e) => e.span,
            Self::Call(e) => e.span,
            Self::New(e) => e.span,
            Self::Index(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Postfix(e) => e.span,
            Self::Assign(e) => e.span,
            Self::Ternary(e) => e.span,
            Self::Query(e) => e.span,
        }
    }

    /// Whether the expression can appear on the left of an assignment.
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Self::Ident(_) | Self::Member(_) | Self::Index(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    pub kind: LiteralKind<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    /// Unescaped string contents
    String(&'ast str),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberExpr<'ast> {
    pub object: &'ast Expr<'ast>,
    pub member: Ident<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// `None` for calls on the implicit receiver
    pub receiver: Option<&'ast Expr<'ast>>,
    pub method: Ident<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewExpr<'ast> {
    pub ty: TypeRef<'ast>,
    pub args: &'ast [Expr<'ast>],
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexExpr<'ast> {
    pub object: &'ast Expr<'ast>,
    pub index: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    pub left: &'ast Expr<'ast>,
    pub op: BinaryOp,
    pub right: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    pub op: UnaryOp,
    pub operand: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostfixExpr<'ast> {
    pub operand: &'ast Expr<'ast>,
    pub op: PostfixOp,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignExpr<'ast> {
    pub target: &'ast Expr<'ast>,
    pub op: AssignOp,
    pub value: &'ast Expr<'ast>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryExpr<'ast> {
    pub condition: &'ast Expr<'ast>,
    pub then_expr: &'ast Expr<'ast>,
    pub else_expr: &'ast Expr<'ast>,
    pub span: Span,
}

/// An inline query. The text between the brackets is passed verbatim to
/// the query executor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryExpr<'ast> {
    pub query: &'ast str,
    pub span: Span,
}
