//! Error types for AIRS operations.
//!
//! Every failure here is a programming or configuration error rather than a
//! transient fault, so nothing is retried: the triggering call aborts and the
//! error names the offending attribute position or selector value.

use thiserror::Error;

/// Result type for AIRS operations.
pub type Result<T> = std::result::Result<T, AirsError>;

/// Errors that can occur during AIRS operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AirsError {
    /// An attribute type has no configured distance or mutation handler,
    /// or a record does not fit the schema.
    #[error("Schema mismatch at attribute {position}: {reason}")]
    SchemaMismatch { position: usize, reason: String },

    /// A computed value escaped its own valid bound.
    #[error("Invariant violated at attribute {position}: {reason}")]
    InvariantViolation { position: usize, reason: String },

    /// An unrecognized selector code or an out-of-range parameter.
    #[error("Invalid {selector} '{value}': {reason}")]
    Configuration {
        selector: String,
        value: String,
        reason: String,
    },

    /// An operation needed at least one record.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// A classifier was asked to predict with no memory cells.
    #[error("Memory cell pool is empty")]
    EmptyPool,
}

// Convenience constructors
impl AirsError {
    pub fn schema_mismatch(position: usize, reason: impl Into<String>) -> Self {
        AirsError::SchemaMismatch {
            position,
            reason: reason.into(),
        }
    }

    pub fn invariant(position: usize, reason: impl Into<String>) -> Self {
        AirsError::InvariantViolation {
            position,
            reason: reason.into(),
        }
    }

    pub fn configuration(
        selector: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        AirsError::Configuration {
            selector: selector.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
