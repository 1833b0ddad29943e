//! Abstract syntax tree for Talon classes.
//!
//! Nodes are allocated in a [`bumpalo::Bump`] arena and borrow from it for
//! the `'ast` lifetime. Every node is `Copy`; child nodes are held as
//! `&'ast` references or `&'ast [T]` slices into the same arena.
//!
//! The tree is produced by an external parser. Hosts and tests that have
//! no parser at hand build trees with [`AstBuilder`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use talon_ast::AstBuilder;
//! use talon_core::Modifiers;
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//! let class = b.class(
//!     Modifiers::PUBLIC,
//!     "Counter",
//!     &[b.field(Modifiers::PRIVATE, b.ty("Integer"), "count", Some(b.int(0)))],
//! );
//! assert_eq!(class.name.name, "Counter");
//! ```

pub mod builder;
pub mod decl;
pub mod expr;
pub mod ops;
pub mod stmt;
pub mod types;

pub use builder::AstBuilder;
pub use decl::*;
pub use expr::*;
pub use ops::*;
pub use stmt::*;
pub use types::*;
