//! Type substitution for template instantiation.
//!
//! Provides functions to substitute template parameters with concrete types.

use kestrel_core::{CompilationError, DataType, Param, Span, TemplateParam, TypeHash};
use rustc_hash::FxHashMap;

/// Map from template parameter hash to concrete type.
pub type SubstitutionMap = FxHashMap<TypeHash, DataType>;

/// Build a substitution map from template parameters and type arguments.
///
/// # Errors
/// Returns error if the number of arguments doesn't match parameters.
pub fn build_substitution_map(
    template_name: &str,
    template_params: &[TemplateParam],
    type_args: &[DataType],
    span: Span,
) -> Result<SubstitutionMap, CompilationError> {
    if template_params.len() != type_args.len() {
        return Err(CompilationError::TemplateArgumentCount {
            name: template_name.to_string(),
            expected: template_params.len(),
            got: type_args.len(),
            span,
        });
    }

    Ok(template_params
        .iter()
        .zip(type_args)
        .map(|(param, arg)| (param.type_hash, *arg))
        .collect())
}

/// Substitute template parameters in a type.
///
/// If the type is a template parameter, replaces it with the concrete type.
pub fn substitute_type(data_type: DataType, subst_map: &SubstitutionMap) -> DataType {
    subst_map.get(&data_type.type_hash).copied().unwrap_or(data_type)
}

/// Substitute template parameters in function parameters. Defaults are kept.
pub fn substitute_params(params: &[Param], subst_map: &SubstitutionMap) -> Vec<Param> {
    params
        .iter()
        .map(|p| Param {
            name: p.name.clone(),
            data_type: substitute_type(p.data_type, subst_map),
            default: p.default,
        })
        .collect()
}
