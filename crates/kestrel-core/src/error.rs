//! Error types for registration and compilation.
//!
//! ```text
//! RegistrationError - type/function registration and class layout errors
//! CompilationError  - semantic and code generation errors, reported to Diagnostics
//! ```
//!
//! Compilation errors are never fatal: the compiler records them through
//! [`Diagnostics`](crate::Diagnostics) and keeps going, so a single run can
//! surface every malformed expression.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Registration Errors
// ============================================================================

/// Errors that occur while registering types and functions, or while
/// computing a class layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A function with this name already exists.
    #[error("duplicate function: {0}")]
    DuplicateFunction(String),

    /// A referenced type was not found.
    #[error("type not found: {0}")]
    TypeNotFound(String),

    /// A field's type has no size (e.g. `void`, or an uninstantiated template parameter).
    #[error("field '{field}' of '{class}' has no size")]
    UnsizedField {
        /// The class being laid out.
        class: String,
        /// The offending field.
        field: String,
    },
}

// ============================================================================
// Compilation Errors
// ============================================================================

/// Errors that occur during compilation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilationError {
    /// A `new` expression whose callee is not constructible.
    #[error("at {span}: Unsupported operation")]
    UnsupportedConstruction {
        /// Where the construction was written.
        span: Span,
    },

    /// Fewer arguments than the callee declares.
    #[error("at {span}: Too few arguments: Expected {expected} but saw {got}")]
    TooFewArguments {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
        span: Span,
    },

    /// More arguments than the callee declares.
    #[error("at {span}: Too many arguments: Expected {expected} but saw {got}")]
    TooManyArguments {
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
        span: Span,
    },

    /// No implicit conversion exists between two types.
    #[error("at {span}: cannot convert '{from}' to '{to}'")]
    ConversionFailure {
        from: String,
        to: String,
        span: Span,
    },

    /// A referenced type could not be found.
    #[error("at {span}: unknown type '{name}'")]
    UnknownType {
        /// The type name that wasn't found.
        name: String,
        /// Where the type was referenced.
        span: Span,
    },

    /// A referenced function could not be found.
    #[error("at {span}: unknown function '{name}'")]
    UnknownFunction {
        /// The function name that wasn't found.
        name: String,
        /// Where the function was called.
        span: Span,
    },

    /// A referenced variable could not be found.
    #[error("at {span}: unknown variable '{name}'")]
    UnknownVariable {
        /// The variable name that wasn't found.
        name: String,
        /// Where the variable was referenced.
        span: Span,
    },

    /// Type arguments were given to something that is not a template.
    #[error("at {span}: '{name}' is not a template")]
    NotATemplate { name: String, span: Span },

    /// Wrong number of template arguments.
    #[error("at {span}: template '{name}' expects {expected} type argument(s), got {got}")]
    TemplateArgumentCount {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },

    /// A value of a type with no size was requested (e.g. `Array<void>`).
    #[error("at {span}: type '{name}' has no size")]
    UnsizedType { name: String, span: Span },

    /// A variable was declared twice in the same function.
    #[error("at {span}: variable '{name}' is already declared")]
    VariableRedeclaration { name: String, span: Span },

    /// A registry operation failed during compilation.
    #[error("at {span}: {error}")]
    Registration {
        error: RegistrationError,
        span: Span,
    },

    /// Internal compiler error (should not happen).
    #[error("internal compiler error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl CompilationError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            CompilationError::UnsupportedConstruction { span } => *span,
            CompilationError::TooFewArguments { span, .. } => *span,
            CompilationError::TooManyArguments { span, .. } => *span,
            CompilationError::ConversionFailure { span, .. } => *span,
            CompilationError::UnknownType { span, .. } => *span,
            CompilationError::UnknownFunction { span, .. } => *span,
            CompilationError::UnknownVariable { span, .. } => *span,
            CompilationError::NotATemplate { span, .. } => *span,
            CompilationError::TemplateArgumentCount { span, .. } => *span,
            CompilationError::UnsizedType { span, .. } => *span,
            CompilationError::VariableRedeclaration { span, .. } => *span,
            CompilationError::Registration { span, .. } => *span,
            CompilationError::Internal { .. } => Span::default(),
        }
    }

    /// Short headline of the diagnostic, without location or detail.
    pub fn message(&self) -> &'static str {
        match self {
            CompilationError::UnsupportedConstruction { .. } => "Unsupported operation",
            CompilationError::TooFewArguments { .. } => "Too few arguments",
            CompilationError::TooManyArguments { .. } => "Too many arguments",
            CompilationError::ConversionFailure { .. } => "Invalid conversion",
            CompilationError::UnknownType { .. } => "Unknown type",
            CompilationError::UnknownFunction { .. } => "Unknown function",
            CompilationError::UnknownVariable { .. } => "Unknown variable",
            CompilationError::NotATemplate { .. } => "Not a template",
            CompilationError::TemplateArgumentCount { .. } => "Wrong number of type arguments",
            CompilationError::UnsizedType { .. } => "Unsized type",
            CompilationError::VariableRedeclaration { .. } => "Variable redeclaration",
            CompilationError::Registration { .. } => "Registration failed",
            CompilationError::Internal { .. } => "Internal compiler error",
        }
    }

    /// Optional secondary line (e.g. `Expected 2 but saw 1`).
    pub fn detail(&self) -> Option<String> {
        match self {
            CompilationError::TooFewArguments { expected, got, .. }
            | CompilationError::TooManyArguments { expected, got, .. }
            | CompilationError::TemplateArgumentCount { expected, got, .. } => {
                Some(format!("Expected {expected} but saw {got}"))
            }
            CompilationError::ConversionFailure { from, to, .. } => {
                Some(format!("'{from}' to '{to}'"))
            }
            CompilationError::Registration { error, .. } => Some(error.to_string()),
            CompilationError::Internal { message } => Some(message.clone()),
            _ => None,
        }
    }
}

impl From<RegistrationError> for CompilationError {
    fn from(error: RegistrationError) -> Self {
        CompilationError::Registration {
            error,
            span: Span::default(),
        }
    }
}
