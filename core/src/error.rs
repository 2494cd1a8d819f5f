//! Common error types for the definition model.

use thiserror::Error;

/// Errors that can occur while interpreting model attributes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Unknown display type spelling.
    #[error("Unknown display type: {0}")]
    UnknownDisplayType(String),

    /// Type descriptor that does not follow any known notation.
    #[error("Invalid type descriptor '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },
}

impl ModelError {
    pub fn invalid_descriptor(descriptor: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
