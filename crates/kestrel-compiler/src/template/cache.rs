//! Template instance cache.

use kestrel_core::TypeHash;
use rustc_hash::FxHashMap;

/// Cache for class template instances.
///
/// Maps (template_hash, type_args) → instance_hash.
#[derive(Debug, Default, Clone)]
pub struct TemplateInstanceCache {
    instances: FxHashMap<(TypeHash, Vec<TypeHash>), TypeHash>,
}

impl TemplateInstanceCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an instance.
    pub fn cache_instance(&mut self, template: TypeHash, args: Vec<TypeHash>, instance: TypeHash) {
        self.instances.insert((template, args), instance);
    }

    /// Look up a cached instance.
    pub fn get_instance(&self, template: TypeHash, args: &[TypeHash]) -> Option<TypeHash> {
        self.instances.get(&(template, args.to_vec())).copied()
    }

    pub fn has_instance(&self, template: TypeHash, args: &[TypeHash]) -> bool {
        self.instances.contains_key(&(template, args.to_vec()))
    }

    /// Get the number of cached instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}
