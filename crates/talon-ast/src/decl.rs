//! Class declarations and their members.

use talon_core::{Modifiers, Span};

use crate::expr::Expr;
use crate::stmt::Block;
use crate::types::{Ident, TypeRef};

/// A class declaration, top-level or nested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDecl<'ast> {
    pub modifiers: Modifiers,
    /// Annotations such as `@isTest`, without the `@`
    pub annotations: &'ast [Ident<'ast>],
    pub name: Ident<'ast>,
    /// `extends` clause
    pub super_class: Option<TypeRef<'ast>>,
    /// `implements` clause
    pub interfaces: &'ast [TypeRef<'ast>],
    /// Members in declaration order
    pub members: &'ast [ClassMember<'ast>],
    pub span: Span,
}

impl<'ast> ClassDecl<'ast> {
    pub fn fields(&self) -> impl Iterator<Item = &'ast FieldDecl<'ast>> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Field(f) => Some(*f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &'ast MethodDecl<'ast>> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(d) => Some(*d),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &'ast MethodDecl<'ast>> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Constructor(d) => Some(*d),
            _ => None,
        })
    }

    pub fn inner_classes(&self) -> impl Iterator<Item = &'ast ClassDecl<'ast>> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Class(c) => Some(*c),
            _ => None,
        })
    }
}

/// A member of a class body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassMember<'ast> {
    Field(&'ast FieldDecl<'ast>),
    Method(&'ast MethodDecl<'ast>),
    /// A constructor; its `return_type` is always `None`.
    Constructor(&'ast MethodDecl<'ast>),
    /// A nested class
    Class(&'ast ClassDecl<'ast>),
}

impl ClassMember<'_> {
    pub fn span(&self) -> Span {
        match self {
            Self::Field(f) => f.span,
            Self::Method(m) | Self::Constructor(m) => m.span,
            Self::Class(c) => c.span,
        }
    }
}

/// A field declaration (`private Integer count = 0;`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDecl<'ast> {
    pub modifiers: Modifiers,
    pub ty: TypeRef<'ast>,
    pub name: Ident<'ast>,
    pub init: Option<&'ast Expr<'ast>>,
    pub span: Span,
}

/// A method or constructor declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodDecl<'ast> {
    pub modifiers: Modifiers,
    /// `None` for `void` methods and constructors
    pub return_type: Option<TypeRef<'ast>>,
    pub name: Ident<'ast>,
    pub params: &'ast [Param<'ast>],
    /// `None` for abstract methods
    pub body: Option<Block<'ast>>,
    pub span: Span,
}

/// A method parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    pub ty: TypeRef<'ast>,
    pub name: Ident<'ast>,
    pub span: Span,
}
