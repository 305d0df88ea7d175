//! Declarations.

use kestrel_core::Span;

use crate::{Ident, Stmt, TypeExpr};

/// A function parameter declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDecl<'ast> {
    pub name: Ident<'ast>,
    pub ty: TypeExpr<'ast>,
    pub span: Span,
}

/// A function declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDecl<'ast> {
    /// Function name
    pub name: Ident<'ast>,
    /// Parameters, in order
    pub params: &'ast [ParamDecl<'ast>],
    /// Return type, `None` for `void`
    pub return_type: Option<TypeExpr<'ast>>,
    /// Body statements
    pub body: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}

/// A compilation unit: a list of function declarations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Script<'ast> {
    functions: &'ast [FunctionDecl<'ast>],
}

impl<'ast> Script<'ast> {
    pub fn new(functions: &'ast [FunctionDecl<'ast>]) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &'ast [FunctionDecl<'ast>] {
        self.functions
    }
}
