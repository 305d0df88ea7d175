//! Non-fatal diagnostic accumulation.
//!
//! Every compilation error is reported here and compilation continues; the
//! code generator substitutes a trap where a value could not be produced.

use std::fmt;

use crate::CompilationError;

/// An ordered collection of reported compilation errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<CompilationError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error.
    pub fn report(&mut self, error: CompilationError) {
        tracing::debug!(span = %error.span(), "{error}");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[CompilationError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilationError> {
        self.errors.iter()
    }

    /// Consume the collection, yielding the errors in report order.
    pub fn into_errors(self) -> Vec<CompilationError> {
        self.errors
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "error: {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    #[test]
    fn report_keeps_order() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.report(CompilationError::UnsupportedConstruction {
            span: Span::new(1, 1, 3),
        });
        diags.report(CompilationError::UnknownVariable {
            name: "n".into(),
            span: Span::new(2, 5, 1),
        });
        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 2);
        assert!(matches!(
            diags.errors()[0],
            CompilationError::UnsupportedConstruction { .. }
        ));
        assert_eq!(
            diags.to_string(),
            "error: at 1:1: Unsupported operation\nerror: at 2:5: unknown variable 'n'\n"
        );
    }
}
