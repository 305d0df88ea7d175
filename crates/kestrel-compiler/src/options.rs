//! Compiler options.

/// Knobs that change the code the compiler emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Symbol called to obtain memory for `new` expressions. It takes one
    /// pointer-sized byte count and returns a pointer.
    pub allocator: String,
    /// Compile and discard arguments passed beyond a callee's parameter list.
    ///
    /// Off by default: excess arguments are reported but never evaluated.
    pub evaluate_excess_arguments: bool,
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allocator(mut self, allocator: impl Into<String>) -> Self {
        self.allocator = allocator.into();
        self
    }

    pub fn with_evaluate_excess_arguments(mut self, evaluate: bool) -> Self {
        self.evaluate_excess_arguments = evaluate;
        self
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            allocator: "malloc".to_string(),
            evaluate_excess_arguments: false,
        }
    }
}
