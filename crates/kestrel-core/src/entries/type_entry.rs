//! Unified type entry.

use crate::TypeHash;

use super::{ClassEntry, ClassTemplateEntry, PrimitiveEntry};

/// A type known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeEntry {
    Primitive(PrimitiveEntry),
    Class(ClassEntry),
    Template(ClassTemplateEntry),
}

impl TypeEntry {
    pub fn type_hash(&self) -> TypeHash {
        match self {
            TypeEntry::Primitive(p) => p.type_hash,
            TypeEntry::Class(c) => c.type_hash,
            TypeEntry::Template(t) => t.type_hash,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeEntry::Primitive(p) => p.name(),
            TypeEntry::Class(c) => &c.name,
            TypeEntry::Template(t) => &t.name,
        }
    }

    pub fn as_class(&self) -> Option<&ClassEntry> {
        match self {
            TypeEntry::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassEntry> {
        match self {
            TypeEntry::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&ClassTemplateEntry> {
        match self {
            TypeEntry::Template(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveEntry> {
        match self {
            TypeEntry::Primitive(p) => Some(p),
            _ => None,
        }
    }
}

impl From<PrimitiveEntry> for TypeEntry {
    fn from(entry: PrimitiveEntry) -> Self {
        TypeEntry::Primitive(entry)
    }
}

impl From<ClassEntry> for TypeEntry {
    fn from(entry: ClassEntry) -> Self {
        TypeEntry::Class(entry)
    }
}

impl From<ClassTemplateEntry> for TypeEntry {
    fn from(entry: ClassTemplateEntry) -> Self {
        TypeEntry::Template(entry)
    }
}
