//! Error types for RPKI record storage.

use rpki_core::{RecordId, ValidationError};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record failed validation and was not written.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A record with this ID already exists.
    #[error("duplicate RPKI record entry: {id}")]
    DuplicateEntry {
        /// The conflicting record ID.
        id: RecordId,
    },

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether this is an infrastructure failure rather than a rejected write.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Serialization(_))
    }
}
