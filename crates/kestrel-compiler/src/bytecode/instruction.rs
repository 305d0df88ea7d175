//! Decoded instructions.
//!
//! [`Instruction`] is the structured view of a chunk: one value per opcode
//! with its operands already read. Tests and the reference interpreter work
//! on decoded instructions rather than raw bytes.

use std::fmt;

use kestrel_core::ValueCategory;
use thiserror::Error;

use super::{Constant, ConstantPool};

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push the constant at this pool index.
    Constant(u16),
    Pop,
    GetLocal(u16),
    SetLocal(u16),
    TeeLocal(u16),
    /// Wrapping integer addition.
    Add(ValueCategory),
    /// Wrapping integer multiplication.
    Mul(ValueCategory),
    Convert {
        from: ValueCategory,
        to: ValueCategory,
        signed: bool,
    },
    Extend8S,
    Extend16S,
    Mask8,
    Mask16,
    NonZero(ValueCategory),
    Store {
        category: ValueCategory,
        offset: u32,
        align: u8,
    },
    /// Call the function named by the symbol constant at `symbol`.
    Call { symbol: u16, argc: u8 },
    Return,
    ReturnVoid,
    Trap,
}

/// Malformed bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid opcode 0x{byte:02x} at offset {offset}")]
    InvalidOpcode { offset: usize, byte: u8 },

    #[error("truncated instruction at offset {offset}")]
    Truncated { offset: usize },

    #[error("invalid value category {byte} at offset {offset}")]
    InvalidCategory { offset: usize, byte: u8 },
}

impl Instruction {
    /// Render this instruction in text form, resolving constants through `pool`.
    pub fn display<'a>(&'a self, pool: &'a ConstantPool) -> InstructionDisplay<'a> {
        InstructionDisplay {
            instruction: self,
            pool,
        }
    }
}

/// Text form of an [`Instruction`].
pub struct InstructionDisplay<'a> {
    instruction: &'a Instruction,
    pool: &'a ConstantPool,
}

impl fmt::Display for InstructionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.instruction {
            Instruction::Constant(index) => match self.pool.get(u32::from(index)) {
                Some(Constant::I32(v)) => write!(f, "i32.const {v}"),
                Some(Constant::I64(v)) => write!(f, "i64.const {v}"),
                Some(Constant::F32(v)) => write!(f, "f32.const {v}"),
                Some(Constant::F64(v)) => write!(f, "f64.const {v}"),
                Some(Constant::Symbol(name)) => write!(f, "symbol {name}"),
                None => write!(f, "const #{index}"),
            },
            Instruction::Pop => f.write_str("drop"),
            Instruction::GetLocal(slot) => write!(f, "local.get {slot}"),
            Instruction::SetLocal(slot) => write!(f, "local.set {slot}"),
            Instruction::TeeLocal(slot) => write!(f, "local.tee {slot}"),
            Instruction::Add(cat) => write!(f, "{cat}.add"),
            Instruction::Mul(cat) => write!(f, "{cat}.mul"),
            Instruction::Convert { from, to, signed } => {
                write!(f, "convert {from}->{to} {}", if signed { "s" } else { "u" })
            }
            Instruction::Extend8S => f.write_str("i32.extend8_s"),
            Instruction::Extend16S => f.write_str("i32.extend16_s"),
            Instruction::Mask8 => f.write_str("i32.mask8"),
            Instruction::Mask16 => f.write_str("i32.mask16"),
            Instruction::NonZero(cat) => write!(f, "{cat}.nez"),
            Instruction::Store {
                category,
                offset,
                align,
            } => write!(f, "{category}.store offset={offset} align={align}"),
            Instruction::Call { symbol, argc } => match self.pool.symbol(u32::from(symbol)) {
                Some(name) => write!(f, "call {name}/{argc}"),
                None => write!(f, "call #{symbol}/{argc}"),
            },
            Instruction::Return => f.write_str("return"),
            Instruction::ReturnVoid => f.write_str("return.void"),
            Instruction::Trap => f.write_str("unreachable"),
        }
    }
}
