//! SymbolRegistry - unified type and function registry.
//!
//! # Storage Model
//!
//! - **Types**: primitives, classes and class templates stored in a single map
//!   by `TypeHash`, with a name index for source-level lookup.
//! - **Functions**: free functions and constructors stored by `TypeHash`,
//!   with a name index. Names are unique; there is no overloading.
//!
//! The registry is owned by whoever drives compilation and is mutated during
//! compilation only to add template instances and to initialize class
//! layouts. It is not thread-safe.
//!
//! # Example
//!
//! ```
//! use kestrel_core::{ClassEntry, DataType, PointerWidth, primitives};
//! use kestrel_registry::SymbolRegistry;
//!
//! let mut registry = SymbolRegistry::with_primitives(PointerWidth::W32);
//! let point = registry
//!     .register_class(
//!         ClassEntry::new("Point")
//!             .with_field("x", DataType::int32())
//!             .with_field("y", DataType::int32()),
//!     )
//!     .unwrap();
//!
//! assert!(registry.get(primitives::INT32).is_some());
//! assert_eq!(registry.initialize_class(point), Ok(8));
//! ```

use rustc_hash::FxHashMap;

use kestrel_core::{
    ClassEntry, ClassFlags, ClassTemplateEntry, DataType, FunctionEntry, PointerWidth,
    PrimitiveEntry, PrimitiveKind, RegistrationError, TypeEntry, TypeHash, TypeLayout,
};

use crate::compute_layout;

/// Unified type and function registry.
#[derive(Debug, Default)]
pub struct SymbolRegistry {
    /// Types by hash.
    types: FxHashMap<TypeHash, TypeEntry>,
    /// Name index for types.
    type_by_name: FxHashMap<String, TypeHash>,
    /// Functions and constructors by hash.
    functions: FxHashMap<TypeHash, FunctionEntry>,
    /// Name index for functions.
    func_by_name: FxHashMap<String, TypeHash>,
    /// Target pointer width, which sizes `uintptr` and object handles.
    pointer_width: PointerWidth,
}

impl SymbolRegistry {
    /// Create a new empty registry.
    pub fn new(pointer_width: PointerWidth) -> Self {
        Self {
            pointer_width,
            ..Self::default()
        }
    }

    /// Create a registry with all primitives pre-registered.
    pub fn with_primitives(pointer_width: PointerWidth) -> Self {
        let mut registry = Self::new(pointer_width);
        registry.register_all_primitives();
        registry
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.pointer_width
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Register a type. Fails if the name or hash is already taken.
    pub fn register_type(&mut self, entry: TypeEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.type_hash();
        let name = entry.name().to_string();

        if self.types.contains_key(&hash) || self.type_by_name.contains_key(&name) {
            return Err(RegistrationError::DuplicateType(name));
        }

        self.type_by_name.insert(name, hash);
        self.types.insert(hash, entry);
        Ok(hash)
    }

    pub fn register_class(&mut self, entry: ClassEntry) -> Result<TypeHash, RegistrationError> {
        self.register_type(TypeEntry::Class(entry))
    }

    pub fn register_template(
        &mut self,
        entry: ClassTemplateEntry,
    ) -> Result<TypeHash, RegistrationError> {
        self.register_type(TypeEntry::Template(entry))
    }

    /// Register a function or constructor. Fails if the name is already taken.
    pub fn register_function(&mut self, entry: FunctionEntry) -> Result<TypeHash, RegistrationError> {
        let hash = entry.def.func_hash;
        if self.functions.contains_key(&hash) || self.func_by_name.contains_key(&entry.def.name) {
            return Err(RegistrationError::DuplicateFunction(entry.def.name));
        }
        self.func_by_name.insert(entry.def.name.clone(), hash);
        self.functions.insert(hash, entry);
        Ok(hash)
    }

    /// Register every primitive type, including `uintptr`.
    pub fn register_all_primitives(&mut self) {
        for kind in PrimitiveKind::ALL {
            let entry = PrimitiveEntry::new(kind);
            self.type_by_name.insert(kind.name().to_string(), entry.type_hash);
            self.types.insert(entry.type_hash, TypeEntry::Primitive(entry));
        }
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Get a type by its hash.
    pub fn get(&self, hash: TypeHash) -> Option<&TypeEntry> {
        self.types.get(&hash)
    }

    pub fn get_class(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.types.get(&hash).and_then(TypeEntry::as_class)
    }

    pub fn get_class_mut(&mut self, hash: TypeHash) -> Option<&mut ClassEntry> {
        self.types.get_mut(&hash).and_then(TypeEntry::as_class_mut)
    }

    pub fn get_template(&self, hash: TypeHash) -> Option<&ClassTemplateEntry> {
        self.types.get(&hash).and_then(TypeEntry::as_template)
    }

    pub fn get_function(&self, hash: TypeHash) -> Option<&FunctionEntry> {
        self.functions.get(&hash)
    }

    /// Look a type up by its source-level name.
    pub fn lookup_type(&self, name: &str) -> Option<&TypeEntry> {
        self.type_by_name.get(name).and_then(|h| self.types.get(h))
    }

    /// Look a function up by its symbol name.
    pub fn lookup_function(&self, name: &str) -> Option<&FunctionEntry> {
        self.func_by_name.get(name).and_then(|h| self.functions.get(h))
    }

    pub fn contains_type(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// The constructor of a class, if it declares one.
    pub fn constructor_of(&self, class: TypeHash) -> Option<&FunctionEntry> {
        self.get_class(class)
            .and_then(|c| c.constructor)
            .and_then(|ctor| self.functions.get(&ctor))
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    // ==========================================================================
    // Layout
    // ==========================================================================

    /// Layout of a value of type `data_type`.
    ///
    /// Class types are handles and take the pointer layout. Returns `None`
    /// for `void`, templates, template parameters and unknown types.
    pub fn layout_of(&self, data_type: DataType) -> Option<TypeLayout> {
        match self.types.get(&data_type.type_hash)? {
            TypeEntry::Primitive(p) => p.kind.layout(self.pointer_width),
            TypeEntry::Class(_) => Some(self.pointer_width.layout()),
            TypeEntry::Template(_) => None,
        }
    }

    /// Display name of a type, for diagnostics.
    pub fn type_name(&self, data_type: DataType) -> String {
        match self.types.get(&data_type.type_hash) {
            Some(entry) => entry.name().to_string(),
            None => data_type.type_hash.to_string(),
        }
    }

    /// Compute field offsets and instance size of a class, once.
    ///
    /// Returns the instance size. Calling this on an already initialized
    /// class returns the stored size without laying the class out again.
    pub fn initialize_class(&mut self, hash: TypeHash) -> Result<u32, RegistrationError> {
        let class = self
            .get_class(hash)
            .ok_or_else(|| RegistrationError::TypeNotFound(hash.to_string()))?;

        if class.is_initialized() {
            return Ok(class.size.unwrap_or(0));
        }

        let field_layouts = class
            .fields
            .iter()
            .map(|field| {
                self.layout_of(field.data_type)
                    .ok_or_else(|| RegistrationError::UnsizedField {
                        class: class.name.clone(),
                        field: field.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let layout = compute_layout(&field_layouts);

        let class = self
            .get_class_mut(hash)
            .ok_or_else(|| RegistrationError::TypeNotFound(hash.to_string()))?;
        for (field, offset) in class.fields.iter_mut().zip(&layout.offsets) {
            field.offset = Some(*offset);
        }
        class.size = Some(layout.size);
        class.align = layout.align;
        class.flags |= ClassFlags::INITIALIZED;

        tracing::debug!(class = %class.name, size = layout.size, align = layout.align, "initialized class layout");
        Ok(layout.size)
    }
}
