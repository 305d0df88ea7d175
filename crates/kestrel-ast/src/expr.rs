//! Expression AST nodes.
//!
//! Provides nodes for:
//! - Literals (integers, floats, booleans)
//! - Identifiers and function calls
//! - Construction expressions (`new T(...)`, `new Array<T>(n)`)
//! - Parenthesized expressions

use std::cell::OnceCell;

use kestrel_core::{DataType, Span};

use crate::{Ident, TypeExpr};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(LiteralExpr),
    /// Identifier reference
    Ident(IdentExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
    /// Object or array construction
    New(&'ast NewExpr<'ast>),
    /// Parenthesized expression
    Paren(&'ast ParenExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::Call(e) => e.span,
            Self::New(e) => e.span,
            Self::Paren(e) => e.span,
        }
    }

    /// The identifier text, if this is a plain identifier.
    pub fn as_ident(&self) -> Option<&'ast str> {
        match self {
            Self::Ident(e) => Some(e.ident.name),
            _ => None,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr {
    /// The literal kind
    pub kind: LiteralKind,
    /// Source location
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind {
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f32),
    /// Double literal
    Double(f64),
    /// Boolean literal
    Bool(bool),
}

/// An identifier expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentExpr<'ast> {
    /// The identifier
    pub ident: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A function call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// The function being called
    pub callee: &'ast Expr<'ast>,
    /// Arguments, in source order
    pub args: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// A construction expression: `new T(args)`, `new T<A, B>(args)`, `new T`.
///
/// `type_args` and `args` distinguish "absent" (`None`) from "written but
/// empty" (`Some(&[])`). The node is read-only except for its resolved type,
/// which the compiler attaches exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr<'ast> {
    /// What is being constructed, usually an identifier
    pub callee: Option<&'ast Expr<'ast>>,
    /// Type arguments (`<...>`)
    pub type_args: Option<&'ast [TypeExpr<'ast>]>,
    /// Value arguments (`(...)`)
    pub args: Option<&'ast [Expr<'ast>]>,
    /// Source location
    pub span: Span,
    resolved_type: OnceCell<DataType>,
}

impl<'ast> NewExpr<'ast> {
    pub fn new(
        callee: Option<&'ast Expr<'ast>>,
        type_args: Option<&'ast [TypeExpr<'ast>]>,
        args: Option<&'ast [Expr<'ast>]>,
        span: Span,
    ) -> Self {
        Self {
            callee,
            type_args,
            args,
            span,
            resolved_type: OnceCell::new(),
        }
    }

    /// The callee's name when the callee is an identifier.
    pub fn callee_name(&self) -> Option<&'ast str> {
        self.callee.and_then(|c| c.as_ident())
    }

    /// Number of value arguments (0 when absent).
    pub fn arg_count(&self) -> usize {
        self.args.map_or(0, <[_]>::len)
    }

    /// Number of type arguments (0 when absent).
    pub fn type_arg_count(&self) -> usize {
        self.type_args.map_or(0, <[_]>::len)
    }

    /// Attach the resolved result type. Only the first call has an effect.
    pub fn annotate(&self, data_type: DataType) {
        let _ = self.resolved_type.set(data_type);
    }

    /// The resolved result type, once compiled.
    pub fn resolved_type(&self) -> Option<DataType> {
        self.resolved_type.get().copied()
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    /// The inner expression
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}
