//! RPKI validation records.
//!
//! [`NewRecord`] is what an ingestion process hands to the store: every field
//! is optional and the status is a raw string, so incomplete input can be
//! represented and rejected by [`NewRecord::into_record`]. [`RpkiRecord`] is
//! the validated, persisted form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::{Asn, RecordId};

/// Outcome of RPKI route origin validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// A ROA covers the prefix and authorizes the origin AS.
    Valid,
    /// A ROA covers the prefix but the origin AS or length does not match.
    Invalid,
    /// No ROA covers the prefix.
    Unknown,
}

impl ValidationStatus {
    /// All statuses, in declaration order.
    pub const ALL: [Self; 3] = [Self::Valid, Self::Invalid, Self::Unknown];

    /// The wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::Invalid => "Invalid",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// Write input for a record, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    /// Caller-supplied identifier; generated on create when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Origin AS.
    #[serde(rename = "ASN", default)]
    pub asn: Option<Asn>,

    /// Announced prefix in CIDR notation.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Geographic state the announcement is attributed to.
    #[serde(default)]
    pub state: Option<String>,

    /// Raw status; must be one of `Valid`, `Invalid`, `Unknown`.
    #[serde(default)]
    pub validation_status: Option<String>,
}

impl NewRecord {
    /// Build a complete input.
    #[must_use]
    pub fn new(
        asn: u32,
        prefix: impl Into<String>,
        state: impl Into<String>,
        status: ValidationStatus,
    ) -> Self {
        Self {
            id: None,
            asn: Some(Asn::new(asn)),
            prefix: Some(prefix.into()),
            state: Some(state.into()),
            validation_status: Some(status.as_str().to_string()),
        }
    }

    /// Pin the identifier instead of generating one.
    #[must_use]
    pub fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    /// Validate the input and stamp it with `now` as both creation and update
    /// time.
    ///
    /// Empty `prefix` and `state` strings are treated as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for the first absent field
    /// and [`ValidationError::InvalidStatus`] when the status is outside the
    /// enum.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<RpkiRecord, ValidationError> {
        let asn = self.asn.ok_or(ValidationError::MissingField("ASN"))?;
        let prefix = non_empty(self.prefix).ok_or(ValidationError::MissingField("prefix"))?;
        let state = non_empty(self.state).ok_or(ValidationError::MissingField("state"))?;
        let validation_status = self
            .validation_status
            .ok_or(ValidationError::MissingField("validationStatus"))?
            .parse::<ValidationStatus>()?;

        Ok(RpkiRecord {
            id: self.id.unwrap_or_else(RecordId::generate),
            asn,
            prefix,
            state,
            validation_status,
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// A stored RPKI validation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpkiRecord {
    /// Primary key.
    pub id: RecordId,

    /// Origin AS.
    #[serde(rename = "ASN")]
    pub asn: Asn,

    /// Announced prefix in CIDR notation.
    pub prefix: String,

    /// Geographic state the announcement is attributed to.
    pub state: String,

    /// Route origin validation outcome.
    pub validation_status: ValidationStatus,

    /// When the record was stored.
    pub created_at: DateTime<Utc>,

    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}
