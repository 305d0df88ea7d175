//! Memory layout and value categories of the target machine.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Width of a pointer on the target linear memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerWidth {
    /// 32-bit addresses (4-byte `uintptr`).
    #[default]
    W32,
    /// 64-bit addresses (8-byte `uintptr`).
    W64,
}

impl PointerWidth {
    /// Size of a pointer in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            PointerWidth::W32 => 4,
            PointerWidth::W64 => 8,
        }
    }

    /// The value category pointers are held in.
    pub const fn category(self) -> ValueCategory {
        match self {
            PointerWidth::W32 => ValueCategory::I32,
            PointerWidth::W64 => ValueCategory::I64,
        }
    }

    /// Layout of a pointer-sized value.
    pub const fn layout(self) -> TypeLayout {
        TypeLayout::new(self.bytes(), self.category())
    }
}

/// How a value is held on the VM stack and in locals.
///
/// Sub-word integers (`int8`, `uint16`, `bool`, ...) live in `I32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ValueCategory {
    I32 = 0,
    I64 = 1,
    F32 = 2,
    F64 = 3,
}

impl ValueCategory {
    pub const fn is_integer(self) -> bool {
        matches!(self, ValueCategory::I32 | ValueCategory::I64)
    }

    pub const fn is_float(self) -> bool {
        matches!(self, ValueCategory::F32 | ValueCategory::F64)
    }

    /// Short mnemonic used in disassembly (`i32`, `f64`, ...).
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ValueCategory::I32 => "i32",
            ValueCategory::I64 => "i64",
            ValueCategory::F32 => "f32",
            ValueCategory::F64 => "f64",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Size, alignment and category of a value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeLayout {
    /// Size in bytes.
    pub size: u32,
    /// Alignment in bytes (a power of two).
    pub align: u32,
    /// Category used for instruction selection.
    pub category: ValueCategory,
}

impl TypeLayout {
    /// Naturally aligned layout: alignment equals size.
    pub const fn new(size: u32, category: ValueCategory) -> Self {
        Self {
            size,
            align: size,
            category,
        }
    }
}

/// Round `offset` up to the next multiple of `align`.
///
/// `align` must be a power of two; an alignment of zero is treated as one.
#[inline]
pub const fn align_up(offset: u32, align: u32) -> u32 {
    if align <= 1 {
        return offset;
    }
    (offset + align - 1) & !(align - 1)
}
