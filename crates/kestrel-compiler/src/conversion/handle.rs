//! Object handle conversions.

use kestrel_core::{DataType, PrimitiveKind};
use kestrel_registry::SymbolRegistry;

use super::{Conversion, ConversionKind};

/// Find a conversion between an object handle and `uintptr`.
pub fn find_handle_conversion(
    source: DataType,
    target: DataType,
    registry: &SymbolRegistry,
) -> Option<Conversion> {
    let is_handle = |dt: DataType| registry.get_class(dt.type_hash).is_some();
    let is_uintptr = |dt: DataType| dt.primitive() == Some(PrimitiveKind::Uintptr);

    if (is_handle(source) && is_uintptr(target)) || (is_uintptr(source) && is_handle(target)) {
        return Some(Conversion {
            kind: ConversionKind::HandleReinterpret,
            from: source,
            to: target,
        });
    }
    None
}
