//! Convenience construction of arena-allocated trees.
//!
//! Every node built through an [`AstBuilder`] gets a distinct span on line 1,
//! numbered by creation order, so diagnostics can be traced back to nodes.

use std::cell::Cell;

use bumpalo::Bump;
use kestrel_core::Span;

use crate::{
    CallExpr, Expr, ExprStmt, FunctionDecl, Ident, IdentExpr, LiteralExpr, LiteralKind, NewExpr,
    ParamDecl, ParenExpr, ReturnStmt, Script, Stmt, TypeExpr, VarDeclStmt,
};

/// Builds AST nodes into an arena.
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    next_col: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            next_col: Cell::new(1),
        }
    }

    pub fn arena(&self) -> &'ast Bump {
        self.arena
    }

    /// A fresh span.
    pub fn span(&self) -> Span {
        let col = self.next_col.get();
        self.next_col.set(col + 1);
        Span::new(1, col, 1)
    }

    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.arena.alloc_str(name), self.span())
    }

    // === Expressions ===

    fn literal(&self, kind: LiteralKind) -> Expr<'ast> {
        Expr::Literal(LiteralExpr {
            kind,
            span: self.span(),
        })
    }

    pub fn int(&self, value: i64) -> Expr<'ast> {
        self.literal(LiteralKind::Int(value))
    }

    pub fn float(&self, value: f32) -> Expr<'ast> {
        self.literal(LiteralKind::Float(value))
    }

    pub fn double(&self, value: f64) -> Expr<'ast> {
        self.literal(LiteralKind::Double(value))
    }

    pub fn bool(&self, value: bool) -> Expr<'ast> {
        self.literal(LiteralKind::Bool(value))
    }

    /// An identifier expression.
    pub fn var(&self, name: &str) -> Expr<'ast> {
        let ident = self.ident(name);
        Expr::Ident(IdentExpr {
            ident,
            span: ident.span,
        })
    }

    /// `name(args...)`
    pub fn call(&self, name: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        let callee = self.arena.alloc(self.var(name));
        Expr::Call(self.arena.alloc(CallExpr {
            callee,
            args: self.arena.alloc_slice_copy(args),
            span: self.span(),
        }))
    }

    pub fn paren(&self, inner: Expr<'ast>) -> Expr<'ast> {
        Expr::Paren(self.arena.alloc(ParenExpr {
            expr: self.arena.alloc(inner),
            span: self.span(),
        }))
    }

    /// A construction expression with full control over every optional part.
    pub fn new_expr(
        &self,
        callee: Option<Expr<'ast>>,
        type_args: Option<&[TypeExpr<'ast>]>,
        args: Option<&[Expr<'ast>]>,
    ) -> Expr<'ast> {
        let callee = callee.map(|c| &*self.arena.alloc(c));
        let type_args = type_args.map(|t| &*self.arena.alloc_slice_copy(t));
        let args = args.map(|a| &*self.arena.alloc_slice_copy(a));
        Expr::New(
            self.arena
                .alloc(NewExpr::new(callee, type_args, args, self.span())),
        )
    }

    /// `new Name(args...)`
    pub fn new_class(&self, name: &str, args: &[Expr<'ast>]) -> Expr<'ast> {
        self.new_expr(Some(self.var(name)), None, Some(args))
    }

    /// `new Name<type_args...>(args...)`
    pub fn new_generic(
        &self,
        name: &str,
        type_args: &[TypeExpr<'ast>],
        args: &[Expr<'ast>],
    ) -> Expr<'ast> {
        self.new_expr(Some(self.var(name)), Some(type_args), Some(args))
    }

    // === Types ===

    pub fn ty(&self, name: &str) -> TypeExpr<'ast> {
        TypeExpr::named(self.ident(name))
    }

    /// `Name<args...>`
    pub fn generic_ty(&self, name: &str, args: &[TypeExpr<'ast>]) -> TypeExpr<'ast> {
        let name = self.ident(name);
        TypeExpr {
            name,
            type_args: self.arena.alloc_slice_copy(args),
            span: name.span,
        }
    }

    // === Statements ===

    pub fn expr_stmt(&self, expr: Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr: self.arena.alloc(expr),
            span: self.span(),
        })
    }

    /// `[ty] name = init;`
    pub fn var_decl(&self, name: &str, ty: Option<TypeExpr<'ast>>, init: Expr<'ast>) -> Stmt<'ast> {
        Stmt::VarDecl(VarDeclStmt {
            name: self.ident(name),
            ty,
            init: self.arena.alloc(init),
            span: self.span(),
        })
    }

    pub fn ret(&self, value: Option<Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            value: value.map(|v| &*self.arena.alloc(v)),
            span: self.span(),
        })
    }

    // === Declarations ===

    pub fn param(&self, name: &str, ty: TypeExpr<'ast>) -> ParamDecl<'ast> {
        ParamDecl {
            name: self.ident(name),
            ty,
            span: self.span(),
        }
    }

    pub fn function(
        &self,
        name: &str,
        params: &[ParamDecl<'ast>],
        return_type: Option<TypeExpr<'ast>>,
        body: &[Stmt<'ast>],
    ) -> FunctionDecl<'ast> {
        FunctionDecl {
            name: self.ident(name),
            params: self.arena.alloc_slice_copy(params),
            return_type,
            body: self.arena.alloc_slice_copy(body),
            span: self.span(),
        }
    }

    pub fn script(&self, functions: &[FunctionDecl<'ast>]) -> Script<'ast> {
        Script::new(self.arena.alloc_slice_copy(functions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_distinct() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let a = b.int(1);
        let c = b.int(2);
        assert_ne!(a.span(), c.span());
    }

    #[test]
    fn new_class_shapes() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let Expr::New(node) = b.new_class("Point", &[b.int(1), b.int(2)]) else {
            panic!("expected new expression");
        };
        assert_eq!(node.callee_name(), Some("Point"));
        assert_eq!(node.arg_count(), 2);
        assert!(node.type_args.is_none());

        let Expr::New(bare) = b.new_expr(Some(b.var("Point")), None, None) else {
            panic!("expected new expression");
        };
        assert!(bare.args.is_none());
    }

    #[test]
    fn generic_type_nesting() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let inner = b.generic_ty("Box", &[b.ty("int")]);
        let outer = b.generic_ty("Box", &[inner]);
        assert!(outer.is_generic());
        assert_eq!(outer.type_args[0].type_args[0].name.name, "int");
    }
}
