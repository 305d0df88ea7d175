//! Statement AST nodes.

use kestrel_core::Span;

use crate::{Expr, Ident, TypeExpr};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression statement (expr;)
    Expr(ExprStmt<'ast>),
    /// Variable declaration
    VarDecl(VarDeclStmt<'ast>),
    /// Return statement
    Return(ReturnStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::VarDecl(s) => s.span,
            Self::Return(s) => s.span,
        }
    }
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    /// The expression
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A variable declaration statement.
///
/// Examples:
/// - `int n = 4;`
/// - `auto p = new Point(1, 2);` (no written type, inferred)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    /// Variable name
    pub name: Ident<'ast>,
    /// Declared type, `None` to infer from the initializer
    pub ty: Option<TypeExpr<'ast>>,
    /// Initializer
    pub init: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A return statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    /// Optional return value
    pub value: Option<&'ast Expr<'ast>>,
    /// Source location
    pub span: Span,
}
