//! Literal expression compilation.

use kestrel_ast::LiteralKind;
use kestrel_core::{DataType, PrimitiveKind};

use super::ExprCompiler;
use crate::expr_info::ExprInfo;

/// Compile a literal with its natural type.
///
/// Integer literals are `int` when they fit in 32 bits and `int64` otherwise.
pub(super) fn compile_literal(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    kind: &LiteralKind,
) -> ExprInfo {
    let emitter = compiler.emitter();
    let data_type = match *kind {
        LiteralKind::Int(value) => match i32::try_from(value) {
            Ok(value) => {
                emitter.emit_i32(value);
                DataType::int32()
            }
            Err(_) => {
                emitter.emit_i64(value);
                DataType::int64()
            }
        },
        LiteralKind::Float(value) => {
            emitter.emit_f32(value);
            DataType::from(PrimitiveKind::Float)
        }
        LiteralKind::Double(value) => {
            emitter.emit_f64(value);
            DataType::double()
        }
        LiteralKind::Bool(value) => {
            emitter.emit_bool(value);
            DataType::bool()
        }
    };
    ExprInfo::rvalue(data_type)
}

/// Emit an integer literal directly as `expected` when the value is
/// representable in it. Returns `None` to fall back to infer-and-convert.
pub(super) fn check_int_literal(
    compiler: &mut ExprCompiler<'_, '_, '_>,
    value: i64,
    expected: DataType,
) -> Option<ExprInfo> {
    let kind = expected.primitive()?;
    let pointer = compiler.ctx().pointer_width();
    let fits = if kind.is_float() {
        true
    } else {
        let (min, max) = kind.int_range(pointer)?;
        (min..=max).contains(&i128::from(value))
    };
    if !fits {
        return None;
    }
    let category = kind.layout(pointer)?.category;
    compiler.emitter().emit_int_as(value, category);
    Some(ExprInfo::rvalue(expected))
}
