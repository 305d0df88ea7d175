//! CompilationContext - unified context for compilation.
//!
//! Owns everything that outlives a single expression: the registry borrow,
//! the template instance cache, the current function's locals and the
//! diagnostics sink.

use kestrel_core::{
    CompilationError, DataType, Diagnostics, PointerWidth, PrimitiveKind, Span, TypeEntry,
    TypeHash, TypeLayout,
};
use kestrel_registry::SymbolRegistry;

use crate::options::CompilerOptions;
use crate::scope::LocalScope;
use crate::template::{TemplateInstanceCache, instantiate_class_template};

/// What a source-level name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A local variable or parameter of the current function.
    Local(DataType),
    Class(TypeHash),
    Template(TypeHash),
    Primitive(PrimitiveKind),
    Function(TypeHash),
    Unresolved,
}

/// Unified compilation context with registry and name resolution.
pub struct CompilationContext<'reg> {
    registry: &'reg mut SymbolRegistry,
    templates: TemplateInstanceCache,
    scope: LocalScope,
    diagnostics: Diagnostics,
    options: CompilerOptions,
}

impl<'reg> CompilationContext<'reg> {
    pub fn new(registry: &'reg mut SymbolRegistry, options: CompilerOptions) -> Self {
        Self {
            registry,
            templates: TemplateInstanceCache::new(),
            scope: LocalScope::new(),
            diagnostics: Diagnostics::new(),
            options,
        }
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &*self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SymbolRegistry {
        &mut *self.registry
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Target pointer width, as configured on the registry.
    pub fn pointer_width(&self) -> PointerWidth {
        self.registry.pointer_width()
    }

    // ==========================================================================
    // Function Scope
    // ==========================================================================

    /// Start a new function: all locals and temporaries are forgotten.
    pub fn begin_function(&mut self) {
        self.scope = LocalScope::new();
    }

    pub fn scope(&self) -> &LocalScope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut LocalScope {
        &mut self.scope
    }

    // ==========================================================================
    // Diagnostics
    // ==========================================================================

    pub fn report(&mut self, error: CompilationError) {
        self.diagnostics.report(error);
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    // ==========================================================================
    // Resolution
    // ==========================================================================

    /// Resolve a name. Locals shadow types, which shadow functions.
    pub fn resolve_symbol(&self, name: &str) -> Resolved {
        if let Some(var) = self.scope.get(name) {
            return Resolved::Local(var.data_type);
        }
        match self.registry.lookup_type(name) {
            Some(TypeEntry::Class(class)) => return Resolved::Class(class.type_hash),
            Some(TypeEntry::Template(template)) => return Resolved::Template(template.type_hash),
            Some(TypeEntry::Primitive(primitive)) => return Resolved::Primitive(primitive.kind),
            None => {}
        }
        match self.registry.lookup_function(name) {
            Some(func) => Resolved::Function(func.def.func_hash),
            None => Resolved::Unresolved,
        }
    }

    /// Instantiate a class template through this compilation's cache.
    pub fn instantiate_template(
        &mut self,
        template: TypeHash,
        type_args: &[DataType],
        span: Span,
    ) -> Result<TypeHash, CompilationError> {
        instantiate_class_template(
            template,
            type_args,
            span,
            &mut self.templates,
            &mut *self.registry,
        )
    }

    pub fn template_cache(&self) -> &TemplateInstanceCache {
        &self.templates
    }

    pub fn layout_of(&self, data_type: DataType) -> Option<TypeLayout> {
        self.registry.layout_of(data_type)
    }

    pub fn type_name(&self, data_type: DataType) -> String {
        self.registry.type_name(data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::{ClassEntry, ClassTemplateEntry, FunctionDef, FunctionEntry};

    fn registry() -> SymbolRegistry {
        let mut registry = SymbolRegistry::with_primitives(PointerWidth::W64);
        registry.register_class(ClassEntry::new("Player")).unwrap();
        registry
            .register_template(ClassTemplateEntry::new("Box", ["T"]))
            .unwrap();
        registry
            .register_function(FunctionEntry::function(FunctionDef::new(
                "spawn",
                vec![],
                DataType::void(),
            )))
            .unwrap();
        registry
    }

    #[test]
    fn resolve_symbol_kinds() {
        let mut registry = registry();
        let ctx = CompilationContext::new(&mut registry, CompilerOptions::default());

        assert_eq!(
            ctx.resolve_symbol("Player"),
            Resolved::Class(TypeHash::from_name("Player"))
        );
        assert_eq!(
            ctx.resolve_symbol("Box"),
            Resolved::Template(TypeHash::from_name("Box"))
        );
        assert_eq!(
            ctx.resolve_symbol("int"),
            Resolved::Primitive(PrimitiveKind::Int32)
        );
        assert!(matches!(ctx.resolve_symbol("spawn"), Resolved::Function(_)));
        assert_eq!(ctx.resolve_symbol("nothing"), Resolved::Unresolved);
        assert_eq!(ctx.pointer_width(), PointerWidth::W64);
    }

    #[test]
    fn locals_shadow_types() {
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        ctx.scope_mut()
            .declare("Player", DataType::int32(), Span::default())
            .unwrap();
        assert_eq!(ctx.resolve_symbol("Player"), Resolved::Local(DataType::int32()));

        ctx.begin_function();
        assert!(matches!(ctx.resolve_symbol("Player"), Resolved::Class(_)));
    }

    #[test]
    fn instantiation_is_cached_per_context() {
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        let template = TypeHash::from_name("Box");
        let a = ctx
            .instantiate_template(template, &[DataType::int32()], Span::default())
            .unwrap();
        let b = ctx
            .instantiate_template(template, &[DataType::int32()], Span::default())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(ctx.template_cache().instance_count(), 1);
        assert_eq!(ctx.type_name(DataType::simple(a)), "Box<int>");
    }

    #[test]
    fn diagnostics_accumulate() {
        let mut registry = registry();
        let mut ctx = CompilationContext::new(&mut registry, CompilerOptions::default());
        ctx.report(CompilationError::UnsupportedConstruction {
            span: Span::default(),
        });
        assert_eq!(ctx.diagnostics().error_count(), 1);
        assert_eq!(ctx.into_diagnostics().into_errors().len(), 1);
    }
}
