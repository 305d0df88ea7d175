//! DataType - the type of a value as seen by the code generator.
//!
//! Objects have reference semantics: a `DataType` naming a class (or a
//! template instance) denotes a pointer-sized handle to an instance, never
//! the instance itself. Sizes and categories are looked up through the
//! registry, which knows the target's pointer width.

use crate::{PrimitiveKind, TypeHash, primitives};

/// The type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataType {
    /// The base type hash.
    pub type_hash: TypeHash,
}

impl DataType {
    /// Create a data type from a type hash.
    #[inline]
    pub const fn simple(type_hash: TypeHash) -> Self {
        Self { type_hash }
    }

    #[inline]
    pub const fn void() -> Self {
        Self::simple(primitives::VOID)
    }

    #[inline]
    pub const fn bool() -> Self {
        Self::simple(primitives::BOOL)
    }

    #[inline]
    pub const fn int32() -> Self {
        Self::simple(primitives::INT32)
    }

    #[inline]
    pub const fn int64() -> Self {
        Self::simple(primitives::INT64)
    }

    #[inline]
    pub const fn uint16() -> Self {
        Self::simple(primitives::UINT16)
    }

    #[inline]
    pub const fn double() -> Self {
        Self::simple(primitives::DOUBLE)
    }

    /// The pointer-sized unsigned integer type.
    #[inline]
    pub const fn uintptr() -> Self {
        Self::simple(primitives::UINTPTR)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.type_hash == primitives::VOID
    }

    /// The primitive kind, if this names a primitive.
    #[inline]
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        PrimitiveKind::from_hash(self.type_hash)
    }
}

impl From<PrimitiveKind> for DataType {
    fn from(kind: PrimitiveKind) -> Self {
        DataType::simple(kind.type_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_lookup() {
        assert_eq!(DataType::uintptr().primitive(), Some(PrimitiveKind::Uintptr));
        assert_eq!(DataType::from(PrimitiveKind::Uint16), DataType::uint16());
        assert_eq!(
            DataType::simple(TypeHash::from_name("Player")).primitive(),
            None
        );
    }

    #[test]
    fn void_check() {
        assert!(DataType::void().is_void());
        assert!(!DataType::int32().is_void());
    }
}
