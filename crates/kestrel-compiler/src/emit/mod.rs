//! Bytecode emitter for the Kestrel compiler.
//!
//! The [`BytecodeEmitter`] provides a high-level API for generating bytecode:
//! typed constants, local slot access, pointer arithmetic at the target's
//! pointer width, stores and calls.
//!
//! # Example
//!
//! ```
//! use kestrel_compiler::bytecode::{ConstantPool, OpCode};
//! use kestrel_compiler::emit::BytecodeEmitter;
//!
//! let mut constants = ConstantPool::new();
//! let mut emitter = BytecodeEmitter::new(&mut constants);
//!
//! emitter.set_line(1);
//! emitter.emit_i32(42);
//! emitter.emit_i32(10);
//! emitter.emit(OpCode::AddI32);
//!
//! let chunk = emitter.finish();
//! chunk.assert_opcodes(&[OpCode::Constant, OpCode::Constant, OpCode::AddI32]);
//! ```

use kestrel_core::{PointerWidth, ValueCategory};

use crate::bytecode::{BytecodeChunk, Constant, ConstantPool, OpCode};

/// Emits bytecode instructions.
///
/// Uses a shared module-level constant pool for deduplication across functions.
/// Each `BytecodeEmitter` produces bytecode for a single function.
pub struct BytecodeEmitter<'pool> {
    /// The bytecode chunk being built (per-function)
    chunk: BytecodeChunk,

    /// Shared module-level constant pool (deduplicated)
    constants: &'pool mut ConstantPool,

    /// Current source line for debug info
    current_line: u32,
}

impl<'pool> BytecodeEmitter<'pool> {
    /// Create a new bytecode emitter.
    pub fn new(constants: &'pool mut ConstantPool) -> Self {
        Self {
            chunk: BytecodeChunk::new(),
            constants,
            current_line: 1,
        }
    }

    /// Set current source line for debug info.
    ///
    /// All subsequent instructions will be associated with this line number.
    pub fn set_line(&mut self, line: u32) {
        self.current_line = line;
    }

    /// Get current source line.
    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    /// The chunk emitted so far.
    pub fn chunk(&self) -> &BytecodeChunk {
        &self.chunk
    }

    pub fn constants(&self) -> &ConstantPool {
        self.constants
    }

    // ==========================================================================
    // Basic Emission
    // ==========================================================================

    /// Emit a single opcode with no operands.
    pub fn emit(&mut self, op: OpCode) {
        self.chunk.write_op(op, self.current_line);
    }

    /// Emit opcode with 8-bit operand.
    pub fn emit_byte(&mut self, op: OpCode, byte: u8) {
        self.chunk.write_op(op, self.current_line);
        self.chunk.write_byte(byte, self.current_line);
    }

    /// Emit opcode with 16-bit operand.
    pub fn emit_u16(&mut self, op: OpCode, value: u16) {
        self.chunk.write_op(op, self.current_line);
        self.chunk.write_u16(value, self.current_line);
    }

    /// Emit a constant load instruction.
    ///
    /// Constants are added to the shared module pool (deduplicated).
    /// Uses narrow (8-bit) or wide (16-bit) index based on pool size.
    pub fn emit_constant(&mut self, constant: Constant) {
        let index = self.constants.add(constant);
        if index < 256 {
            self.emit_byte(OpCode::Constant, index as u8);
        } else {
            self.emit_u16(OpCode::ConstantWide, index as u16);
        }
    }

    // ==========================================================================
    // Constants
    // ==========================================================================

    pub fn emit_i32(&mut self, value: i32) {
        self.emit_constant(Constant::I32(value));
    }

    pub fn emit_i64(&mut self, value: i64) {
        self.emit_constant(Constant::I64(value));
    }

    pub fn emit_f32(&mut self, value: f32) {
        self.emit_constant(Constant::F32(value));
    }

    pub fn emit_f64(&mut self, value: f64) {
        self.emit_constant(Constant::F64(value));
    }

    /// Booleans are `i32` 0 or 1.
    pub fn emit_bool(&mut self, value: bool) {
        self.emit_i32(i32::from(value));
    }

    /// Emit an integer constant in the given category.
    ///
    /// The value is truncated to the category's width. Float categories
    /// receive the numerically converted value.
    pub fn emit_int_as(&mut self, value: i64, category: ValueCategory) {
        match category {
            ValueCategory::I32 => self.emit_i32(value as i32),
            ValueCategory::I64 => self.emit_i64(value),
            ValueCategory::F32 => self.emit_f32(value as f32),
            ValueCategory::F64 => self.emit_f64(value as f64),
        }
    }

    // ==========================================================================
    // Pointer Arithmetic
    // ==========================================================================

    /// Emit a pointer-sized integer constant.
    pub fn emit_ptr_const(&mut self, value: u64, pointer: PointerWidth) {
        match pointer {
            PointerWidth::W32 => self.emit_i32(value as u32 as i32),
            PointerWidth::W64 => self.emit_i64(value as i64),
        }
    }

    /// Wrapping pointer-sized addition.
    pub fn emit_ptr_add(&mut self, pointer: PointerWidth) {
        self.emit(match pointer {
            PointerWidth::W32 => OpCode::AddI32,
            PointerWidth::W64 => OpCode::AddI64,
        });
    }

    /// Wrapping pointer-sized multiplication.
    pub fn emit_ptr_mul(&mut self, pointer: PointerWidth) {
        self.emit(match pointer {
            PointerWidth::W32 => OpCode::MulI32,
            PointerWidth::W64 => OpCode::MulI64,
        });
    }

    // ==========================================================================
    // Locals
    // ==========================================================================

    fn emit_slot(&mut self, narrow: OpCode, wide: OpCode, slot: u32) {
        if slot < 256 {
            self.emit_byte(narrow, slot as u8);
        } else {
            self.emit_u16(wide, slot as u16);
        }
    }

    pub fn emit_get_local(&mut self, slot: u32) {
        self.emit_slot(OpCode::GetLocal, OpCode::GetLocalWide, slot);
    }

    pub fn emit_set_local(&mut self, slot: u32) {
        self.emit_slot(OpCode::SetLocal, OpCode::SetLocalWide, slot);
    }

    /// Store to a local and keep the value on the stack.
    pub fn emit_tee_local(&mut self, slot: u32) {
        self.emit_slot(OpCode::TeeLocal, OpCode::TeeLocalWide, slot);
    }

    // ==========================================================================
    // Stack, Conversion and Memory
    // ==========================================================================

    pub fn emit_pop(&mut self) {
        self.emit(OpCode::Pop);
    }

    pub fn emit_convert(&mut self, from: ValueCategory, to: ValueCategory, signed: bool) {
        self.emit(OpCode::Convert);
        self.chunk.write_byte(from.into(), self.current_line);
        self.chunk.write_byte(to.into(), self.current_line);
        self.chunk.write_byte(u8::from(signed), self.current_line);
    }

    /// Store the value on top of the stack at `address + offset`.
    ///
    /// Expects the address below the value.
    pub fn emit_store(&mut self, category: ValueCategory, offset: u32, align: u8) {
        self.emit(match category {
            ValueCategory::I32 => OpCode::Store32,
            ValueCategory::I64 => OpCode::Store64,
            ValueCategory::F32 => OpCode::StoreF32,
            ValueCategory::F64 => OpCode::StoreF64,
        });
        self.chunk.write_byte(align, self.current_line);
        self.chunk.write_u32(offset, self.current_line);
    }

    // ==========================================================================
    // Calls and Control
    // ==========================================================================

    /// Call a function by symbol name with `argc` arguments on the stack.
    pub fn emit_call(&mut self, name: &str, argc: u8) {
        let index = self.constants.add_symbol(name);
        self.emit(OpCode::Call);
        self.chunk.write_u16(index as u16, self.current_line);
        self.chunk.write_byte(argc, self.current_line);
    }

    pub fn emit_return(&mut self) {
        self.emit(OpCode::Return);
    }

    pub fn emit_return_void(&mut self) {
        self.emit(OpCode::ReturnVoid);
    }

    /// Emit a trap standing in for a value that failed to compile.
    pub fn emit_trap(&mut self) {
        self.emit(OpCode::Trap);
    }

    // ==========================================================================
    // Finalization
    // ==========================================================================

    /// Finish emission and return the completed bytecode chunk.
    pub fn finish(self) -> BytecodeChunk {
        self.chunk
    }
}
