//! Primitive type conversions.
//!
//! This module handles conversions between primitive types (integers, floats,
//! bool) and the code that performs them. Integer conversions wrap. Values of
//! sub-word types always live in an `i32` normalized to their own range, so
//! any conversion that could leave bits outside that range re-normalizes.

use kestrel_core::{DataType, PointerWidth, PrimitiveKind, ValueCategory};

use super::{Conversion, ConversionKind};
use crate::bytecode::OpCode;
use crate::emit::BytecodeEmitter;

/// Find primitive type conversion.
pub fn find_primitive_conversion(source: DataType, target: DataType) -> Option<Conversion> {
    let from = source.primitive()?;
    let to = target.primitive()?;

    if from == to && from != PrimitiveKind::Void {
        return Some(Conversion::identity(source));
    }

    let allowed = match (from, to) {
        (PrimitiveKind::Void, _) | (_, PrimitiveKind::Void) => false,
        (f, t) if f.is_integer() && (t.is_integer() || t.is_float()) => true,
        (f, t) if f.is_float() && (t.is_integer() || t.is_float()) => true,
        (f, PrimitiveKind::Bool) => f.is_integer(),
        (PrimitiveKind::Bool, t) => t.is_integer(),
        _ => false,
    };

    allowed.then_some(Conversion {
        kind: ConversionKind::Primitive { from, to },
        from: source,
        to: target,
    })
}

/// Inclusive value range of an integer-like kind. `bool` is `0..=1`.
fn value_range(kind: PrimitiveKind, pointer: PointerWidth) -> Option<(i128, i128)> {
    match kind {
        PrimitiveKind::Bool => Some((0, 1)),
        _ => kind.int_range(pointer),
    }
}

/// Emit the instructions converting a `from` value on the stack to `to`.
pub fn emit_primitive_conversion(
    emitter: &mut BytecodeEmitter<'_>,
    from: PrimitiveKind,
    to: PrimitiveKind,
    pointer: PointerWidth,
) {
    let (Some(from_layout), Some(to_layout)) = (from.layout(pointer), to.layout(pointer)) else {
        return;
    };
    let (from_cat, to_cat) = (from_layout.category, to_layout.category);

    if to == PrimitiveKind::Bool {
        emitter.emit(match from_cat {
            ValueCategory::I64 => OpCode::NonZeroI64,
            _ => OpCode::NonZeroI32,
        });
        return;
    }

    if from_cat != to_cat {
        // Float-to-int rounds toward zero into the target's signedness;
        // everything else reads the source by its own signedness.
        let signed = if from.is_float() {
            to.is_signed()
        } else {
            from.is_signed()
        };
        emitter.emit_convert(from_cat, to_cat, signed);
    }

    let contained = match (value_range(from, pointer), value_range(to, pointer)) {
        (Some((from_min, from_max)), Some((to_min, to_max))) => {
            from_min >= to_min && from_max <= to_max
        }
        _ => false,
    };
    if contained {
        return;
    }
    match to {
        PrimitiveKind::Int8 => emitter.emit(OpCode::Extend8S),
        PrimitiveKind::Uint8 => emitter.emit(OpCode::Mask8),
        PrimitiveKind::Int16 => emitter.emit(OpCode::Extend16S),
        PrimitiveKind::Uint16 => emitter.emit(OpCode::Mask16),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytecode::{ConstantPool, Instruction};

    fn emitted(from: PrimitiveKind, to: PrimitiveKind, pointer: PointerWidth) -> Vec<Instruction> {
        let mut constants = ConstantPool::new();
        let mut emitter = BytecodeEmitter::new(&mut constants);
        emit_primitive_conversion(&mut emitter, from, to, pointer);
        emitter.finish().decode().unwrap()
    }

    #[test]
    fn allowed_conversions() {
        let find = |from: PrimitiveKind, to: PrimitiveKind| {
            find_primitive_conversion(from.into(), to.into()).is_some()
        };
        assert!(find(PrimitiveKind::Int32, PrimitiveKind::Uintptr));
        assert!(find(PrimitiveKind::Double, PrimitiveKind::Int8));
        assert!(find(PrimitiveKind::Int64, PrimitiveKind::Bool));
        assert!(find(PrimitiveKind::Bool, PrimitiveKind::Int32));
        assert!(!find(PrimitiveKind::Double, PrimitiveKind::Bool));
        assert!(!find(PrimitiveKind::Bool, PrimitiveKind::Float));
        assert!(!find(PrimitiveKind::Void, PrimitiveKind::Int32));
        assert!(!find(PrimitiveKind::Int32, PrimitiveKind::Void));
    }

    #[test]
    fn same_category_widening_is_free() {
        assert!(emitted(PrimitiveKind::Int8, PrimitiveKind::Int32, PointerWidth::W32).is_empty());
        assert!(emitted(PrimitiveKind::Uint32, PrimitiveKind::Uintptr, PointerWidth::W32).is_empty());
    }

    #[test]
    fn integer_widening_uses_source_signedness() {
        assert_eq!(
            emitted(PrimitiveKind::Int32, PrimitiveKind::Uintptr, PointerWidth::W64),
            vec![Instruction::Convert {
                from: ValueCategory::I32,
                to: ValueCategory::I64,
                signed: true
            }]
        );
        assert_eq!(
            emitted(PrimitiveKind::Uint16, PrimitiveKind::Int64, PointerWidth::W32),
            vec![Instruction::Convert {
                from: ValueCategory::I32,
                to: ValueCategory::I64,
                signed: false
            }]
        );
    }

    #[test]
    fn narrowing_normalizes_sub_word_targets() {
        assert_eq!(
            emitted(PrimitiveKind::Int32, PrimitiveKind::Uint16, PointerWidth::W32),
            vec![Instruction::Mask16]
        );
        assert_eq!(
            emitted(PrimitiveKind::Int64, PrimitiveKind::Int8, PointerWidth::W32),
            vec![
                Instruction::Convert {
                    from: ValueCategory::I64,
                    to: ValueCategory::I32,
                    signed: true
                },
                Instruction::Extend8S,
            ]
        );
    }

    #[test]
    fn float_to_int_uses_target_signedness() {
        assert_eq!(
            emitted(PrimitiveKind::Double, PrimitiveKind::Uint32, PointerWidth::W32),
            vec![Instruction::Convert {
                from: ValueCategory::F64,
                to: ValueCategory::I32,
                signed: false
            }]
        );
    }

    #[test]
    fn int_to_bool_tests_non_zero() {
        assert_eq!(
            emitted(PrimitiveKind::Int64, PrimitiveKind::Bool, PointerWidth::W32),
            vec![Instruction::NonZero(ValueCategory::I64)]
        );
    }
}
