//! Registry entries.
//!
//! Descriptors stored by the symbol registry:
//!
//! - [`PrimitiveEntry`]: built-in value types
//! - [`ClassEntry`]: concrete, laid-out record types
//! - [`ClassTemplateEntry`]: generic class blueprints
//! - [`FunctionEntry`]: functions and constructors
//! - [`TypeEntry`]: the unified type entry

mod class;
mod function;
mod primitive;
mod template;
mod type_entry;

pub use class::{ClassEntry, ClassFlags, FieldEntry};
pub use function::{ConstValue, FunctionDef, FunctionEntry, Param};
pub use primitive::PrimitiveEntry;
pub use template::{ClassTemplateEntry, TemplateParam};
pub use type_entry::TypeEntry;
