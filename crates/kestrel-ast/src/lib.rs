//! Kestrel syntax tree.
//!
//! All nodes are allocated in a [`bumpalo::Bump`] arena and borrow from it
//! for the `'ast` lifetime. There is no parser in this crate; front ends
//! (and tests) build trees directly or through [`AstBuilder`].
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use kestrel_ast::{AstBuilder, Expr};
//!
//! let arena = Bump::new();
//! let b = AstBuilder::new(&arena);
//!
//! // new Array<int>(16)
//! let expr = b.new_generic("Array", &[b.ty("int")], &[b.int(16)]);
//! let Expr::New(node) = expr else { unreachable!() };
//! assert_eq!(node.callee_name(), Some("Array"));
//! assert_eq!(node.arg_count(), 1);
//! ```

mod builder;
mod decl;
mod expr;
mod node;
mod stmt;
mod types;

pub use builder::AstBuilder;
pub use decl::{FunctionDecl, ParamDecl, Script};
pub use expr::{
    CallExpr, Expr, IdentExpr, LiteralExpr, LiteralKind, NewExpr, ParenExpr,
};
pub use node::Ident;
pub use stmt::{ExprStmt, ReturnStmt, Stmt, VarDeclStmt};
pub use types::TypeExpr;
