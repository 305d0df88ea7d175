//! Bytecode chunk for compiled functions.
//!
//! A `BytecodeChunk` contains the compiled bytecode for a single function,
//! along with line number information for debugging.

use kestrel_core::ValueCategory;

use super::{ConstantPool, DecodeError, Instruction, OpCode};

/// A chunk of compiled bytecode for a single function.
///
/// Constants are stored at module level in a `ConstantPool`, not per-function.
/// This allows deduplication of constants across functions.
#[derive(Debug, Clone, Default)]
pub struct BytecodeChunk {
    /// The bytecode instructions.
    code: Vec<u8>,
    /// Line numbers for debugging (parallel to code).
    /// Each entry corresponds to a byte in `code`.
    lines: Vec<u32>,
}

impl BytecodeChunk {
    /// Create a new empty bytecode chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an opcode.
    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.write_byte(op.into(), line);
    }

    /// Write a byte operand.
    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Write a 16-bit operand (big-endian).
    pub fn write_u16(&mut self, value: u16, line: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte, line);
        }
    }

    /// Write a 32-bit operand (big-endian).
    pub fn write_u32(&mut self, value: u32, line: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte, line);
        }
    }

    /// Get the bytecode.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Get the line numbers.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Get the line number for a given offset.
    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    /// Get the length of the bytecode.
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Read a byte at the given offset.
    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Read a u16 at the given offset (big-endian).
    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        let bytes = self.code.get(offset..offset + 2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a u32 at the given offset (big-endian).
    pub fn read_u32(&self, offset: usize) -> Option<u32> {
        let bytes = self.code.get(offset..offset + 4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an opcode at the given offset.
    pub fn read_op(&self, offset: usize) -> Option<OpCode> {
        self.code.get(offset).and_then(|&b| OpCode::from_u8(b))
    }

    /// Extract all opcodes from the chunk, skipping operands.
    ///
    /// This is useful for testing bytecode sequences without worrying about
    /// specific operand values or instruction offsets.
    pub fn opcodes(&self) -> Vec<OpCode> {
        let mut ops = Vec::new();
        let mut offset = 0;

        while offset < self.code.len() {
            if let Some(op) = self.read_op(offset) {
                ops.push(op);
                offset += 1 + op.operand_size();
            } else {
                // Invalid opcode, skip one byte
                offset += 1;
            }
        }

        ops
    }

    /// Check if this chunk contains exactly the given opcode sequence.
    ///
    /// This ignores operand values, only checking the opcodes themselves.
    /// Panics with a descriptive message if the sequences don't match.
    #[track_caller]
    pub fn assert_opcodes(&self, expected: &[OpCode]) {
        let actual = self.opcodes();
        assert_eq!(
            actual,
            expected,
            "Bytecode mismatch.\nExpected: {:?}\nActual:   {:?}",
            expected.iter().map(|op| op.name()).collect::<Vec<_>>(),
            actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
        );
    }

    // ==========================================================================
    // Decoding
    // ==========================================================================

    /// Decode the whole chunk into instructions.
    ///
    /// Narrow and wide forms of the same operation decode to the same
    /// instruction.
    pub fn decode(&self) -> Result<Vec<Instruction>, DecodeError> {
        let mut instructions = Vec::new();
        let mut offset = 0;
        while offset < self.code.len() {
            let (instruction, next) = self.decode_at(offset)?;
            instructions.push(instruction);
            offset = next;
        }
        Ok(instructions)
    }

    /// Decode one instruction, returning it with the offset of the next one.
    pub fn decode_at(&self, offset: usize) -> Result<(Instruction, usize), DecodeError> {
        let byte = self
            .read_byte(offset)
            .ok_or(DecodeError::Truncated { offset })?;
        let op = OpCode::from_u8(byte).ok_or(DecodeError::InvalidOpcode { offset, byte })?;
        let at = offset + 1;
        let next = at + op.operand_size();
        if next > self.code.len() {
            return Err(DecodeError::Truncated { offset });
        }

        let truncated = DecodeError::Truncated { offset };
        let byte_at = |i: usize| self.read_byte(i).ok_or(truncated.clone());
        let u16_at = |i: usize| self.read_u16(i).ok_or(truncated.clone());
        let category_at = |i: usize| {
            let byte = byte_at(i)?;
            ValueCategory::try_from(byte).map_err(|_| DecodeError::InvalidCategory { offset: i, byte })
        };

        let instruction = match op {
            OpCode::Constant => Instruction::Constant(u16::from(byte_at(at)?)),
            OpCode::ConstantWide => Instruction::Constant(u16_at(at)?),
            OpCode::Pop => Instruction::Pop,
            OpCode::GetLocal => Instruction::GetLocal(u16::from(byte_at(at)?)),
            OpCode::SetLocal => Instruction::SetLocal(u16::from(byte_at(at)?)),
            OpCode::TeeLocal => Instruction::TeeLocal(u16::from(byte_at(at)?)),
            OpCode::GetLocalWide => Instruction::GetLocal(u16_at(at)?),
            OpCode::SetLocalWide => Instruction::SetLocal(u16_at(at)?),
            OpCode::TeeLocalWide => Instruction::TeeLocal(u16_at(at)?),
            OpCode::AddI32 => Instruction::Add(ValueCategory::I32),
            OpCode::AddI64 => Instruction::Add(ValueCategory::I64),
            OpCode::MulI32 => Instruction::Mul(ValueCategory::I32),
            OpCode::MulI64 => Instruction::Mul(ValueCategory::I64),
            OpCode::Convert => Instruction::Convert {
                from: category_at(at)?,
                to: category_at(at + 1)?,
                signed: byte_at(at + 2)? != 0,
            },
            OpCode::Extend8S => Instruction::Extend8S,
            OpCode::Extend16S => Instruction::Extend16S,
            OpCode::Mask8 => Instruction::Mask8,
            OpCode::Mask16 => Instruction::Mask16,
            OpCode::NonZeroI32 => Instruction::NonZero(ValueCategory::I32),
            OpCode::NonZeroI64 => Instruction::NonZero(ValueCategory::I64),
            OpCode::Store32 | OpCode::Store64 | OpCode::StoreF32 | OpCode::StoreF64 => {
                let category = match op {
                    OpCode::Store32 => ValueCategory::I32,
                    OpCode::Store64 => ValueCategory::I64,
                    OpCode::StoreF32 => ValueCategory::F32,
                    _ => ValueCategory::F64,
                };
                Instruction::Store {
                    category,
                    align: byte_at(at)?,
                    offset: self.read_u32(at + 1).ok_or(truncated.clone())?,
                }
            }
            OpCode::Call => Instruction::Call {
                symbol: u16_at(at)?,
                argc: byte_at(at + 2)?,
            },
            OpCode::Return => Instruction::Return,
            OpCode::ReturnVoid => Instruction::ReturnVoid,
            OpCode::Trap => Instruction::Trap,
        };

        Ok((instruction, next))
    }

    /// Text listing of the chunk, one instruction per line.
    pub fn disassemble(&self, pool: &ConstantPool) -> Result<Vec<String>, DecodeError> {
        Ok(self
            .decode()?
            .iter()
            .map(|i| i.display(pool).to_string())
            .collect())
    }
}
