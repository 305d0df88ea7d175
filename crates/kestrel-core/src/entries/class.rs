//! Class type entry.
//!
//! This module provides `ClassEntry` for concrete record types, including
//! template instances such as `Box<int>`. The instance layout (field
//! offsets and total size) is computed once, by the registry, the first time
//! the class is initialized.

use bitflags::bitflags;

use crate::{DataType, TypeHash};

bitflags! {
    /// State and origin flags of a class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u8 {
        /// Field offsets and instance size have been computed.
        const INITIALIZED = 1 << 0;
        /// Produced by instantiating a class template.
        const TEMPLATE_INSTANCE = 1 << 1;
    }
}

/// A data member of a class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEntry {
    /// Field name.
    pub name: String,
    /// Field type.
    pub data_type: DataType,
    /// Byte offset inside the instance, set on initialization.
    pub offset: Option<u32>,
}

impl FieldEntry {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            offset: None,
        }
    }
}

/// Registry entry for a class type.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassEntry {
    /// Class name (for template instances, the display name `Box<int>`).
    pub name: String,
    /// Type hash for identity.
    pub type_hash: TypeHash,
    /// Direct field members, in declaration order.
    pub fields: Vec<FieldEntry>,
    /// Constructor function hash, if the class declares one.
    pub constructor: Option<TypeHash>,
    /// Layout state and origin.
    pub flags: ClassFlags,
    /// Total instance size in bytes, known once initialized.
    pub size: Option<u32>,
    /// Instance alignment in bytes, known once initialized.
    pub align: u32,

    // === Template Info ===
    /// Template this was instantiated from.
    pub template: Option<TypeHash>,
    /// Type arguments for template instances.
    pub type_args: Vec<DataType>,
}

impl ClassEntry {
    /// Create a new, uninitialized class entry.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            type_hash: TypeHash::from_name(&name),
            name,
            fields: Vec::new(),
            constructor: None,
            flags: ClassFlags::empty(),
            size: None,
            align: 1,
            template: None,
            type_args: Vec::new(),
        }
    }

    // === Builder Methods ===

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.fields.push(FieldEntry::new(name, data_type));
        self
    }

    /// Set the constructor.
    pub fn with_constructor(mut self, ctor: TypeHash) -> Self {
        self.constructor = Some(ctor);
        self
    }

    /// Mark this class as an instance of `template` with the given arguments.
    pub fn with_template_instance(mut self, template: TypeHash, type_args: Vec<DataType>) -> Self {
        self.type_hash = TypeHash::from_template_instance(
            template,
            &type_args.iter().map(|t| t.type_hash).collect::<Vec<_>>(),
        );
        self.template = Some(template);
        self.type_args = type_args;
        self.flags |= ClassFlags::TEMPLATE_INSTANCE;
        self
    }

    // === Queries ===

    pub fn is_initialized(&self) -> bool {
        self.flags.contains(ClassFlags::INITIALIZED)
    }

    pub fn is_template_instance(&self) -> bool {
        self.flags.contains(ClassFlags::TEMPLATE_INSTANCE)
    }

    /// Find a field by name.
    pub fn find_field(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|f| f.name == name)
    }
}
