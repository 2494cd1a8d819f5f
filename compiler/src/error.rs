//! Compiler error types.
//!
//! Only problems that make the whole batch meaningless are errors. Everything
//! scoped to a single definition is reported as a diagnostic instead.

use defcomp_forest::ForestError;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The inheritance forest could not be built.
    #[error("Forest error: {0}")]
    Forest(#[from] ForestError),

    /// Compiler configuration could not be read.
    #[error("Invalid compiler configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl CompileError {
    pub fn unknown_parent(definition: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::Forest(ForestError::UnknownParent {
            definition: definition.into(),
            parent: parent.into(),
        })
    }

    pub fn inheritance_cycle(cycle: impl Into<String>) -> Self {
        Self::Forest(ForestError::InheritanceCycle {
            cycle: cycle.into(),
        })
    }

    /// Returns true if the batch was rejected because of an inheritance cycle.
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Forest(ForestError::InheritanceCycle { .. }))
    }
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
