//! Expression type information for the compiler.
//!
//! `ExprInfo` captures the result of type-checking an expression: its type
//! and where its value lives.

use kestrel_core::DataType;

/// The source/storage class of an expression value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueSource {
    /// A temporary value (rvalue, literals, expression results).
    #[default]
    Temporary,
    /// A local variable or function parameter.
    Local,
}

/// Result of type-checking an expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprInfo {
    /// The type of the expression.
    pub data_type: DataType,
    /// Whether this is an lvalue (names a storage location).
    pub is_lvalue: bool,
    /// The source/storage class of this value.
    pub source: ValueSource,
}

impl ExprInfo {
    /// Create an rvalue (temporary, cannot be assigned to).
    pub fn rvalue(data_type: DataType) -> Self {
        Self {
            data_type,
            is_lvalue: false,
            source: ValueSource::Temporary,
        }
    }

    /// Create an lvalue for a local variable.
    pub fn local(data_type: DataType) -> Self {
        Self {
            data_type,
            is_lvalue: true,
            source: ValueSource::Local,
        }
    }

    /// Same value with a different static type, as after a conversion.
    pub fn with_type(self, data_type: DataType) -> Self {
        Self::rvalue(data_type)
    }
}
