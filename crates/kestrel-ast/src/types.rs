//! Type expressions.

use kestrel_core::Span;

use crate::Ident;

/// A written type: a name with optional type arguments (`int`, `Box<int>`,
/// `Pair<int, Box<double>>`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeExpr<'ast> {
    /// The type name
    pub name: Ident<'ast>,
    /// Type arguments, empty for non-generic types
    pub type_args: &'ast [TypeExpr<'ast>],
    /// Source location
    pub span: Span,
}

impl<'ast> TypeExpr<'ast> {
    /// A type without arguments.
    pub fn named(name: Ident<'ast>) -> Self {
        Self {
            name,
            type_args: &[],
            span: name.span,
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.type_args.is_empty()
    }
}
