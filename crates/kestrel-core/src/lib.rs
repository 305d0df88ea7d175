//! Kestrel core types.
//!
//! Shared by every other crate in the workspace:
//!
//! - [`Span`]: source locations for diagnostics
//! - [`TypeHash`]: deterministic identities for types and functions
//! - [`DataType`], [`PrimitiveKind`], [`TypeLayout`]: the semantic type model
//! - [`entries`]: registry descriptors (classes, templates, functions)
//! - [`CompilationError`], [`RegistrationError`], [`Diagnostics`]: error reporting

pub mod data_type;
pub mod diagnostics;
pub mod entries;
pub mod error;
pub mod layout;
pub mod primitive_kind;
pub mod span;
pub mod type_hash;

pub use data_type::DataType;
pub use diagnostics::Diagnostics;
pub use entries::{
    ClassEntry, ClassFlags, ClassTemplateEntry, ConstValue, FieldEntry, FunctionDef,
    FunctionEntry, Param, PrimitiveEntry, TemplateParam, TypeEntry,
};
pub use error::{CompilationError, RegistrationError};
pub use layout::{PointerWidth, TypeLayout, ValueCategory, align_up};
pub use primitive_kind::PrimitiveKind;
pub use span::Span;
pub use type_hash::{TypeHash, primitives};
