//! Symbol registry for the Kestrel compiler.
//!
//! Stores primitives, classes, class templates and functions by
//! [`TypeHash`](kestrel_core::TypeHash), and computes class instance layouts
//! on demand.

mod layout;
mod registry;

pub use layout::{ClassLayout, compute_layout};
pub use registry::SymbolRegistry;
