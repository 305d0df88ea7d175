//! Bytecode operation codes.
//!
//! This module defines the instruction set of the Kestrel VM. Each opcode is
//! a single byte, with operands following inline (big-endian).

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Bytecode operation codes.
///
/// The VM is a stack machine over typed values (`i32`, `i64`, `f32`, `f64`)
/// with byte-addressable linear memory. Pointers are `i32` or `i64` values
/// depending on the target's pointer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    // =========================================================================
    // Constants
    // =========================================================================
    /// Push constant from pool (8-bit index).
    /// Operand: u8 constant index
    Constant = 0,
    /// Push constant from pool (16-bit index).
    /// Operand: u16 constant index
    ConstantWide,

    // =========================================================================
    // Stack Operations
    // =========================================================================
    /// Pop top of stack.
    Pop,

    // =========================================================================
    // Local Variables
    // =========================================================================
    /// Load local variable.
    /// Operand: u8 slot index
    GetLocal,
    /// Pop and store to local variable.
    /// Operand: u8 slot index
    SetLocal,
    /// Store to local variable, leaving the value on the stack.
    /// Operand: u8 slot index
    TeeLocal,
    /// Operand: u16 slot index
    GetLocalWide,
    /// Operand: u16 slot index
    SetLocalWide,
    /// Operand: u16 slot index
    TeeLocalWide,

    // =========================================================================
    // Integer Arithmetic (wrapping)
    // =========================================================================
    AddI32,
    AddI64,
    MulI32,
    MulI64,

    // =========================================================================
    // Conversions
    // =========================================================================
    /// Convert between value categories.
    /// Operands: u8 source category, u8 target category, u8 signed flag
    ///
    /// The signed flag selects sign- or zero-extension for integer widening,
    /// the interpretation of the source for int-to-float, and the target
    /// interpretation for float-to-int. It is ignored otherwise.
    Convert,
    /// Sign-extend the low 8 bits of an i32.
    Extend8S,
    /// Sign-extend the low 16 bits of an i32.
    Extend16S,
    /// Keep the low 8 bits of an i32.
    Mask8,
    /// Keep the low 16 bits of an i32.
    Mask16,
    /// Replace an i32 with 1 if it is non-zero, else 0.
    NonZeroI32,
    /// Replace an i64 with the i32 1 if it is non-zero, else 0.
    NonZeroI64,

    // =========================================================================
    // Memory
    // =========================================================================
    /// Pop value and address, store 4 bytes at `address + offset`.
    /// Operands: u8 alignment, u32 offset
    Store32,
    /// Operands: u8 alignment, u32 offset
    Store64,
    /// Operands: u8 alignment, u32 offset
    StoreF32,
    /// Operands: u8 alignment, u32 offset
    StoreF64,

    // =========================================================================
    // Calls
    // =========================================================================
    /// Call a function by symbol name.
    /// Operands: u16 symbol constant index, u8 argument count
    Call,
    /// Return the value on top of the stack.
    Return,
    /// Return without a value.
    ReturnVoid,
    /// Halt execution. Used as a placeholder for values that could not be
    /// compiled; it stands in for a value of any type.
    Trap,
}

impl OpCode {
    /// Convert from u8, returning None for invalid values.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::try_from(value).ok()
    }

    /// Get the size of operands for this opcode in bytes.
    ///
    /// This does NOT include the opcode byte itself.
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::Constant | OpCode::GetLocal | OpCode::SetLocal | OpCode::TeeLocal => 1,

            OpCode::ConstantWide
            | OpCode::GetLocalWide
            | OpCode::SetLocalWide
            | OpCode::TeeLocalWide => 2,

            OpCode::Convert | OpCode::Call => 3,

            OpCode::Store32 | OpCode::Store64 | OpCode::StoreF32 | OpCode::StoreF64 => 5,

            OpCode::Pop
            | OpCode::AddI32
            | OpCode::AddI64
            | OpCode::MulI32
            | OpCode::MulI64
            | OpCode::Extend8S
            | OpCode::Extend16S
            | OpCode::Mask8
            | OpCode::Mask16
            | OpCode::NonZeroI32
            | OpCode::NonZeroI64
            | OpCode::Return
            | OpCode::ReturnVoid
            | OpCode::Trap => 0,
        }
    }

    /// Human-readable opcode name.
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Constant => "Constant",
            OpCode::ConstantWide => "ConstantWide",
            OpCode::Pop => "Pop",
            OpCode::GetLocal => "GetLocal",
            OpCode::SetLocal => "SetLocal",
            OpCode::TeeLocal => "TeeLocal",
            OpCode::GetLocalWide => "GetLocalWide",
            OpCode::SetLocalWide => "SetLocalWide",
            OpCode::TeeLocalWide => "TeeLocalWide",
            OpCode::AddI32 => "AddI32",
            OpCode::AddI64 => "AddI64",
            OpCode::MulI32 => "MulI32",
            OpCode::MulI64 => "MulI64",
            OpCode::Convert => "Convert",
            OpCode::Extend8S => "Extend8S",
            OpCode::Extend16S => "Extend16S",
            OpCode::Mask8 => "Mask8",
            OpCode::Mask16 => "Mask16",
            OpCode::NonZeroI32 => "NonZeroI32",
            OpCode::NonZeroI64 => "NonZeroI64",
            OpCode::Store32 => "Store32",
            OpCode::Store64 => "Store64",
            OpCode::StoreF32 => "StoreF32",
            OpCode::StoreF64 => "StoreF64",
            OpCode::Call => "Call",
            OpCode::Return => "Return",
            OpCode::ReturnVoid => "ReturnVoid",
            OpCode::Trap => "Trap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8_roundtrip() {
        for op in [OpCode::Constant, OpCode::TeeLocal, OpCode::Store32, OpCode::Trap] {
            let byte: u8 = op.into();
            assert_eq!(OpCode::from_u8(byte), Some(op));
        }
        assert_eq!(OpCode::from_u8(0xFF), None);
    }

    #[test]
    fn operand_sizes() {
        assert_eq!(OpCode::Constant.operand_size(), 1);
        assert_eq!(OpCode::GetLocalWide.operand_size(), 2);
        assert_eq!(OpCode::Call.operand_size(), 3);
        assert_eq!(OpCode::Store32.operand_size(), 5);
        assert_eq!(OpCode::Trap.operand_size(), 0);
    }
}
