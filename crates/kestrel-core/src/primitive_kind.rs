//! Primitive type kinds: the built-in numeric, boolean and pointer types.

use std::fmt;

use crate::{PointerWidth, TypeHash, TypeLayout, ValueCategory};

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Void,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float,
    Double,
    Uintptr,
}

impl PrimitiveKind {
    /// Every primitive, in registration order.
    pub const ALL: [PrimitiveKind; 13] = [
        PrimitiveKind::Void,
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Uint8,
        PrimitiveKind::Uint16,
        PrimitiveKind::Uint32,
        PrimitiveKind::Uint64,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Uintptr,
    ];

    /// Get the TypeHash for this primitive type.
    pub const fn type_hash(self) -> TypeHash {
        use crate::primitives;
        match self {
            PrimitiveKind::Void => primitives::VOID,
            PrimitiveKind::Bool => primitives::BOOL,
            PrimitiveKind::Int8 => primitives::INT8,
            PrimitiveKind::Int16 => primitives::INT16,
            PrimitiveKind::Int32 => primitives::INT32,
            PrimitiveKind::Int64 => primitives::INT64,
            PrimitiveKind::Uint8 => primitives::UINT8,
            PrimitiveKind::Uint16 => primitives::UINT16,
            PrimitiveKind::Uint32 => primitives::UINT32,
            PrimitiveKind::Uint64 => primitives::UINT64,
            PrimitiveKind::Float => primitives::FLOAT,
            PrimitiveKind::Double => primitives::DOUBLE,
            PrimitiveKind::Uintptr => primitives::UINTPTR,
        }
    }

    /// Get the source-level name of this primitive type.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Int8 => "int8",
            PrimitiveKind::Int16 => "int16",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "int64",
            PrimitiveKind::Uint8 => "uint8",
            PrimitiveKind::Uint16 => "uint16",
            PrimitiveKind::Uint32 => "uint",
            PrimitiveKind::Uint64 => "uint64",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Uintptr => "uintptr",
        }
    }

    /// Look a primitive up by its type hash.
    pub fn from_hash(hash: TypeHash) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_hash() == hash)
    }

    /// Size, alignment and category on a target. `None` for `void`.
    pub const fn layout(self, pointer: PointerWidth) -> Option<TypeLayout> {
        let layout = match self {
            PrimitiveKind::Void => return None,
            PrimitiveKind::Bool | PrimitiveKind::Int8 | PrimitiveKind::Uint8 => {
                TypeLayout::new(1, ValueCategory::I32)
            }
            PrimitiveKind::Int16 | PrimitiveKind::Uint16 => TypeLayout::new(2, ValueCategory::I32),
            PrimitiveKind::Int32 | PrimitiveKind::Uint32 => TypeLayout::new(4, ValueCategory::I32),
            PrimitiveKind::Int64 | PrimitiveKind::Uint64 => TypeLayout::new(8, ValueCategory::I64),
            PrimitiveKind::Float => TypeLayout::new(4, ValueCategory::F32),
            PrimitiveKind::Double => TypeLayout::new(8, ValueCategory::F64),
            PrimitiveKind::Uintptr => pointer.layout(),
        };
        Some(layout)
    }

    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8
                | PrimitiveKind::Int16
                | PrimitiveKind::Int32
                | PrimitiveKind::Int64
                | PrimitiveKind::Uint8
                | PrimitiveKind::Uint16
                | PrimitiveKind::Uint32
                | PrimitiveKind::Uint64
                | PrimitiveKind::Uintptr
        )
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64
        )
    }

    pub const fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float | PrimitiveKind::Double)
    }

    /// Inclusive value range of an integer kind, `None` for non-integers.
    pub const fn int_range(self, pointer: PointerWidth) -> Option<(i128, i128)> {
        let range = match self {
            PrimitiveKind::Int8 => (i8::MIN as i128, i8::MAX as i128),
            PrimitiveKind::Int16 => (i16::MIN as i128, i16::MAX as i128),
            PrimitiveKind::Int32 => (i32::MIN as i128, i32::MAX as i128),
            PrimitiveKind::Int64 => (i64::MIN as i128, i64::MAX as i128),
            PrimitiveKind::Uint8 => (0, u8::MAX as i128),
            PrimitiveKind::Uint16 => (0, u16::MAX as i128),
            PrimitiveKind::Uint32 => (0, u32::MAX as i128),
            PrimitiveKind::Uint64 => (0, u64::MAX as i128),
            PrimitiveKind::Uintptr => match pointer {
                PointerWidth::W32 => (0, u32::MAX as i128),
                PointerWidth::W64 => (0, u64::MAX as i128),
            },
            _ => return None,
        };
        Some(range)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
