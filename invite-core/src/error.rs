//! Error types for design operations.

use thiserror::Error;

/// Result type for design operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Errors that can occur when working with designs.
///
/// Editing operations never error: an unknown element id degrades to a
/// no-op. Only the serialization boundary with the host can fail.
#[derive(Debug, Error)]
pub enum DesignError {
    /// Design serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
