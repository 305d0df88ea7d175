//! Bytecode types for the Kestrel compiler.
//!
//! This module contains the core bytecode types:
//!
//! - [`OpCode`] - The instruction set for the VM
//! - [`BytecodeChunk`] - Compiled bytecode for a function
//! - [`Instruction`] - A decoded instruction with its operands
//! - [`Constant`] and [`ConstantPool`] - Module-level constant storage

mod chunk;
mod constant;
mod instruction;
mod opcode;

pub use chunk::BytecodeChunk;
pub use constant::{Constant, ConstantPool};
pub use instruction::{DecodeError, Instruction, InstructionDisplay};
pub use opcode::OpCode;
