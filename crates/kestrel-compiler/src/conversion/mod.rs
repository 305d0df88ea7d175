//! Type conversion system.
//!
//! Determines whether a value of one type may be used where another is
//! expected, and emits the instructions that perform the conversion.
//!
//! ## Conversion Priority
//!
//! Conversions are checked in this order:
//! 1. Identity (exact match)
//! 2. Primitive conversions (integer width and sign, int/float, to bool)
//! 3. Handle conversions (object handle to and from `uintptr`)
//!
//! Conversions between unrelated classes do not exist.

use kestrel_core::{DataType, PointerWidth};
use kestrel_registry::SymbolRegistry;

use crate::emit::BytecodeEmitter;

mod handle;
mod primitive;

pub use handle::find_handle_conversion;
pub use primitive::{emit_primitive_conversion, find_primitive_conversion};

/// An implicit conversion between two types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// The kind of conversion being performed.
    pub kind: ConversionKind,
    /// Source type.
    pub from: DataType,
    /// Target type.
    pub to: DataType,
}

/// The kind of conversion being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// No conversion needed (exact match).
    Identity,

    /// Primitive type conversion (int -> float, etc.).
    Primitive {
        from: kestrel_core::PrimitiveKind,
        to: kestrel_core::PrimitiveKind,
    },

    /// Object handle reinterpreted as `uintptr` or back. Both have the
    /// pointer layout, so no code is emitted.
    HandleReinterpret,
}

impl Conversion {
    pub fn identity(data_type: DataType) -> Self {
        Self {
            kind: ConversionKind::Identity,
            from: data_type,
            to: data_type,
        }
    }

    /// Whether applying this conversion emits no code.
    pub fn is_free(&self) -> bool {
        matches!(
            self.kind,
            ConversionKind::Identity | ConversionKind::HandleReinterpret
        )
    }
}

/// Find an implicit conversion from `source` to `target`.
pub fn find_conversion(
    source: DataType,
    target: DataType,
    registry: &SymbolRegistry,
) -> Option<Conversion> {
    if source == target {
        return Some(Conversion::identity(source));
    }
    find_primitive_conversion(source, target).or_else(|| find_handle_conversion(source, target, registry))
}

/// Emit the instructions for `conversion`, which must have been found for
/// the given pointer width's registry.
pub fn emit_conversion(
    emitter: &mut BytecodeEmitter<'_>,
    conversion: &Conversion,
    pointer: PointerWidth,
) {
    if let ConversionKind::Primitive { from, to } = conversion.kind {
        emit_primitive_conversion(emitter, from, to, pointer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_core::{ClassEntry, PrimitiveKind};

    #[test]
    fn identity_for_any_type() {
        let registry = SymbolRegistry::with_primitives(PointerWidth::W32);
        let player = DataType::simple(kestrel_core::TypeHash::from_name("Player"));
        let conv = find_conversion(player, player, &registry).unwrap();
        assert_eq!(conv.kind, ConversionKind::Identity);
        assert!(conv.is_free());
    }

    #[test]
    fn primitive_before_handle() {
        let registry = SymbolRegistry::with_primitives(PointerWidth::W32);
        let conv = find_conversion(DataType::int32(), DataType::uintptr(), &registry).unwrap();
        assert_eq!(
            conv.kind,
            ConversionKind::Primitive {
                from: PrimitiveKind::Int32,
                to: PrimitiveKind::Uintptr
            }
        );
    }

    #[test]
    fn unrelated_classes_do_not_convert() {
        let mut registry = SymbolRegistry::with_primitives(PointerWidth::W32);
        let a = registry.register_class(ClassEntry::new("A")).unwrap();
        let b = registry.register_class(ClassEntry::new("B")).unwrap();
        assert_eq!(
            find_conversion(DataType::simple(a), DataType::simple(b), &registry),
            None
        );
        assert_eq!(
            find_conversion(DataType::simple(a), DataType::int32(), &registry),
            None
        );
    }
}
