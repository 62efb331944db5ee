//! Error types for RPKI records and filters.

use crate::asn::ParseAsnError;

/// A record failed write-time validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The validation status is not one of `Valid`, `Invalid`, `Unknown`.
    #[error("invalid validation status {0:?}: expected Valid, Invalid or Unknown")]
    InvalidStatus(String),
}

/// Query input could not be turned into a [`RecordFilter`](crate::RecordFilter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// The `ASN` parameter is not a 32-bit unsigned integer.
    #[error(transparent)]
    InvalidAsn(#[from] ParseAsnError),
}
