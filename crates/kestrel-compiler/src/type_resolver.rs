//! Type resolution for converting AST type expressions to semantic DataTypes.
//!
//! This module provides [`TypeResolver`], which converts AST [`TypeExpr`] nodes
//! into semantic [`DataType`] values.
//!
//! ## Features
//!
//! - Primitive type resolution (int, float, bool, void, etc.)
//! - Named class resolution
//! - Template instantiation for generic types (`Box<int>`, nested arguments)
//!
//! Local variables never shadow names in type position.

use kestrel_ast::TypeExpr;
use kestrel_core::{CompilationError, DataType, TypeEntry};

use crate::context::CompilationContext;

/// Resolves AST type expressions to semantic DataTypes.
///
/// Template instantiation is performed when resolving types with template arguments.
pub struct TypeResolver<'a, 'reg> {
    ctx: &'a mut CompilationContext<'reg>,
}

impl<'a, 'reg> TypeResolver<'a, 'reg> {
    /// Create a new type resolver with the given compilation context.
    pub fn new(ctx: &'a mut CompilationContext<'reg>) -> Self {
        Self { ctx }
    }

    /// Resolve a TypeExpr to a DataType.
    pub fn resolve(&mut self, type_expr: &TypeExpr<'_>) -> Result<DataType, CompilationError> {
        let name = type_expr.name.name;
        let span = type_expr.span;

        let (hash, template_params) = match self.ctx.registry().lookup_type(name) {
            Some(TypeEntry::Template(template)) => (template.type_hash, Some(template.param_count())),
            Some(entry) => (entry.type_hash(), None),
            None => {
                return Err(CompilationError::UnknownType {
                    name: name.to_string(),
                    span,
                });
            }
        };

        match template_params {
            None if type_expr.is_generic() => Err(CompilationError::NotATemplate {
                name: name.to_string(),
                span,
            }),
            None => Ok(DataType::simple(hash)),
            Some(expected) if !type_expr.is_generic() => {
                Err(CompilationError::TemplateArgumentCount {
                    name: name.to_string(),
                    expected,
                    got: 0,
                    span,
                })
            }
            Some(_) => {
                let type_args = self.resolve_all(type_expr.type_args)?;
                let instance = self.ctx.instantiate_template(hash, &type_args, span)?;
                Ok(DataType::simple(instance))
            }
        }
    }

    /// Resolve a list of type expressions, stopping at the first failure.
    pub fn resolve_all(
        &mut self,
        type_exprs: &[TypeExpr<'_>],
    ) -> Result<Vec<DataType>, CompilationError> {
        type_exprs.iter().map(|t| self.resolve(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use kestrel_ast::AstBuilder;
    use kestrel_core::{ClassEntry, ClassTemplateEntry, PointerWidth, TypeHash};
    use kestrel_registry::SymbolRegistry;

    use crate::options::CompilerOptions;

    fn registry() -> SymbolRegistry {
        let mut registry = SymbolRegistry::with_primitives(PointerWidth::W32);
        registry.register_class(ClassEntry::new("Player")).unwrap();
        let pair = ClassTemplateEntry::new("Pair", ["K", "V"]);
        let (k, v) = (pair.param("K").unwrap(), pair.param("V").unwrap());
        registry
            .register_template(pair.with_field("key", k).with_field("value", v))
            .unwrap();
        registry
            .register_template(ClassTemplateEntry::new("Box", ["T"]))
            .unwrap();
        registry
    }

    #[test]
    fn resolve_primitive_and_class() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut resolver = TypeResolver::new(&mut ctx);

        assert_eq!(resolver.resolve(&b.ty("int")), Ok(DataType::int32()));
        assert_eq!(
            resolver.resolve(&b.ty("Player")),
            Ok(DataType::simple(TypeHash::from_name("Player")))
        );
    }

    #[test]
    fn resolve_nested_template() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());

        let ty = b.generic_ty("Pair", &[b.ty("int"), b.generic_ty("Box", &[b.ty("double")])]);
        let resolved = TypeResolver::new(&mut ctx).resolve(&ty).unwrap();

        assert_eq!(ctx.type_name(resolved), "Pair<int, Box<double>>");
        assert_eq!(ctx.template_cache().instance_count(), 2);
    }

    #[test]
    fn resolution_errors() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let mut resolver = TypeResolver::new(&mut ctx);

        assert!(matches!(
            resolver.resolve(&b.ty("Ghost")),
            Err(CompilationError::UnknownType { .. })
        ));
        assert!(matches!(
            resolver.resolve(&b.generic_ty("int", &[b.ty("int")])),
            Err(CompilationError::NotATemplate { .. })
        ));
        assert!(matches!(
            resolver.resolve(&b.ty("Box")),
            Err(CompilationError::TemplateArgumentCount {
                expected: 1,
                got: 0,
                ..
            })
        ));
        assert!(matches!(
            resolver.resolve(&b.generic_ty("Pair", &[b.ty("int")])),
            Err(CompilationError::TemplateArgumentCount {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn locals_do_not_shadow_types() {
        let arena = Bump::new();
        let b = AstBuilder::new(&arena);
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        ctx.scope_mut()
            .declare("Player", DataType::int32(), kestrel_core::Span::default())
            .unwrap();

        let resolved = TypeResolver::new(&mut ctx).resolve(&b.ty("Player")).unwrap();
        assert_eq!(resolved, DataType::simple(TypeHash::from_name("Player")));
    }
}
