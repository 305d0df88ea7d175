//! Template instantiation system.
//!
//! Class templates are instantiated on demand when a `new` expression (or a
//! type annotation) names them with concrete type arguments. Instances are
//! cached so that every mention of `Box<int>` in a compilation resolves to
//! the same class entry.
//!
//! ## Components
//!
//! - [`TemplateInstanceCache`]: Cache for template instances
//! - [`SubstitutionMap`]: Maps template parameters to concrete types
//! - [`instantiate_class_template`]: Instantiate a class template

mod cache;
mod instantiation;
mod substitution;

pub use cache::TemplateInstanceCache;
pub use instantiation::{format_template_instance_name, instantiate_class_template};
pub use substitution::{SubstitutionMap, build_substitution_map, substitute_params, substitute_type};
