//! Class instance layout.
//!
//! Fields are placed in declaration order at their natural alignment. The
//! instance is aligned to its most-aligned field and its size is rounded up
//! to that alignment. A class without fields has size 0.

use kestrel_core::{TypeLayout, align_up};

/// Computed layout of a class instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLayout {
    /// Byte offset of each field, in declaration order.
    pub offsets: Vec<u32>,
    /// Total instance size in bytes.
    pub size: u32,
    /// Instance alignment in bytes.
    pub align: u32,
}

/// Lay out fields with the given layouts.
pub fn compute_layout(fields: &[TypeLayout]) -> ClassLayout {
    let mut offsets = Vec::with_capacity(fields.len());
    let mut offset = 0;
    let mut align = 1;
    for field in fields {
        offset = align_up(offset, field.align);
        offsets.push(offset);
        offset += field.size;
        align = align.max(field.align);
    }
    ClassLayout {
        offsets,
        size: align_up(offset, align),
        align,
    }
}
