//! Local scope management for function compilation.
//!
//! This module provides `LocalScope` for tracking local variables during
//! function body compilation. Every variable, parameter and compiler
//! temporary owns one slot for the lifetime of the function.
//!
//! Compiler temporaries use names starting with `.`, which no source
//! identifier can spell, and are shared by every expression in the function
//! that asks for the same name.

use kestrel_core::{CompilationError, DataType, Span};
use rustc_hash::FxHashMap;

// ============================================================================
// Types
// ============================================================================

/// Information about a local variable.
#[derive(Debug, Clone)]
pub struct LocalVar {
    /// Variable name
    pub name: String,
    /// Variable type
    pub data_type: DataType,
    /// Slot index
    pub slot: u32,
    /// Source location of declaration
    pub span: Span,
}

// ============================================================================
// LocalScope
// ============================================================================

/// Local scope for a function being compiled.
#[derive(Debug, Default)]
pub struct LocalScope {
    /// Variables by name
    variables: FxHashMap<String, LocalVar>,
    /// Type of each allocated slot, by slot index
    slots: Vec<DataType>,
}

impl LocalScope {
    /// Create a new local scope for a function.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable in a fresh slot.
    ///
    /// Fails if a variable with this name already exists in the function.
    pub fn declare(
        &mut self,
        name: &str,
        data_type: DataType,
        span: Span,
    ) -> Result<u32, CompilationError> {
        if self.variables.contains_key(name) {
            return Err(CompilationError::VariableRedeclaration {
                name: name.to_string(),
                span,
            });
        }
        let slot = self.allocate_slot(data_type);
        self.variables.insert(
            name.to_string(),
            LocalVar {
                name: name.to_string(),
                data_type,
                slot,
                span,
            },
        );
        Ok(slot)
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&LocalVar> {
        self.variables.get(name)
    }

    /// Slot of the named compiler temporary, allocating it on first use.
    pub fn temporary(&mut self, name: &str, data_type: DataType) -> u32 {
        debug_assert!(name.starts_with('.'), "temporary names start with '.'");
        if let Some(var) = self.variables.get(name) {
            return var.slot;
        }
        let slot = self.allocate_slot(data_type);
        self.variables.insert(
            name.to_string(),
            LocalVar {
                name: name.to_string(),
                data_type,
                slot,
                span: Span::default(),
            },
        );
        slot
    }

    fn allocate_slot(&mut self, data_type: DataType) -> u32 {
        let slot = self.slots.len() as u32;
        self.slots.push(data_type);
        slot
    }

    /// Number of slots the function's frame needs.
    pub fn frame_size(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Type of each slot, by slot index.
    pub fn slot_types(&self) -> &[DataType] {
        &self.slots
    }
}
