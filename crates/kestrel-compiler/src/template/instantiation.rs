//! Template instantiation logic.

use kestrel_core::{
    ClassEntry, CompilationError, DataType, FunctionDef, FunctionEntry, Span, TypeEntry, TypeHash,
};
use kestrel_registry::SymbolRegistry;

use super::cache::TemplateInstanceCache;
use super::substitution::{build_substitution_map, substitute_params, substitute_type};

/// Instantiate a class template with concrete type arguments.
///
/// Returns the hash of the instance class. The instance is registered as an
/// ordinary, uninitialized class named `Template<Args>`, with its fields and
/// constructor parameters substituted. Repeated requests with the same
/// arguments return the same hash without touching the registry.
///
/// # Arguments
/// * `template_hash` - Hash of the template type (e.g., hash of "Box")
/// * `type_args` - Concrete types to substitute (e.g., [int])
/// * `span` - Source location for error reporting
/// * `cache` - Template instance cache
/// * `registry` - Registry to look up types and register instances
pub fn instantiate_class_template(
    template_hash: TypeHash,
    type_args: &[DataType],
    span: Span,
    cache: &mut TemplateInstanceCache,
    registry: &mut SymbolRegistry,
) -> Result<TypeHash, CompilationError> {
    // 1. Compute instance hash
    let arg_hashes: Vec<TypeHash> = type_args.iter().map(|a| a.type_hash).collect();
    let instance_hash = TypeHash::from_template_instance(template_hash, &arg_hashes);

    // 2. Check cache
    if let Some(cached) = cache.get_instance(template_hash, &arg_hashes) {
        return Ok(cached);
    }

    // 3. Check if already in registry (registered by the host)
    if registry.contains_type(instance_hash) {
        cache.cache_instance(template_hash, arg_hashes, instance_hash);
        return Ok(instance_hash);
    }

    // 4. Get template definition
    let template = match registry.get(template_hash) {
        Some(TypeEntry::Template(template)) => template,
        Some(other) => {
            return Err(CompilationError::NotATemplate {
                name: other.name().to_string(),
                span,
            });
        }
        None => {
            return Err(CompilationError::UnknownType {
                name: template_hash.to_string(),
                span,
            });
        }
    };

    // 5. Build substitution map
    let subst_map = build_substitution_map(&template.name, &template.params, type_args, span)?;

    // 6. Create instance entry
    let instance_name = format_template_instance_name(&template.name, type_args, registry);
    let mut instance = ClassEntry::new(&instance_name);
    for (name, data_type) in &template.fields {
        instance = instance.with_field(name.clone(), substitute_type(*data_type, &subst_map));
    }
    let constructor = template.constructor.as_ref().map(|params| {
        FunctionDef::constructor(
            &instance_name,
            instance_hash,
            substitute_params(params, &subst_map),
        )
    });
    if let Some(ctor) = &constructor {
        instance = instance.with_constructor(ctor.func_hash);
    }
    let instance = instance.with_template_instance(template_hash, type_args.to_vec());

    // 7. Register instance and its constructor
    let registration = |error| CompilationError::Registration { error, span };
    registry.register_class(instance).map_err(registration)?;
    if let Some(ctor) = constructor {
        registry
            .register_function(FunctionEntry::constructor(ctor))
            .map_err(registration)?;
    }

    // 8. Cache the instance
    cache.cache_instance(template_hash, arg_hashes, instance_hash);

    tracing::debug!(instance = %instance_name, "instantiated class template");
    Ok(instance_hash)
}

/// Format template instance name: "Box<int>" or "Pair<int, double>".
pub fn format_template_instance_name(
    base_name: &str,
    type_args: &[DataType],
    registry: &SymbolRegistry,
) -> String {
    let args = type_args
        .iter()
        .map(|t| registry.type_name(*t))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{base_name}<{args}>")
}
