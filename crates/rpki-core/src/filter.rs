//! Record filters.

use serde::Serialize;

use crate::error::FilterError;
use crate::{Asn, RpkiRecord};

/// Exact-match filter over the indexed record fields.
///
/// Every populated key must match (logical AND); an absent key imposes no
/// constraint. Matching is literal and case-sensitive. Serializes to the
/// query string of `GET /rpki`, omitting absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordFilter {
    /// Origin AS.
    #[serde(rename = "ASN", skip_serializing_if = "Option::is_none")]
    pub asn: Option<Asn>,

    /// Prefix, compared as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// State, compared as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl RecordFilter {
    /// A filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the origin AS.
    #[must_use]
    pub fn with_asn(mut self, asn: u32) -> Self {
        self.asn = Some(Asn::new(asn));
        self
    }

    /// Constrain the prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Constrain the state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Build a filter from raw query parameters.
    ///
    /// Values are trimmed; absent and blank parameters are skipped, so
    /// `?state=` or `?ASN=%20` never turns into a constraint.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidAsn`] if `asn` is present but is not a
    /// 32-bit unsigned integer (optionally written `AS<n>`).
    pub fn from_params(
        asn: Option<&str>,
        prefix: Option<&str>,
        state: Option<&str>,
    ) -> Result<Self, FilterError> {
        let asn = supplied(asn).map(str::parse::<Asn>).transpose()?;

        Ok(Self {
            asn,
            prefix: supplied(prefix).map(ToOwned::to_owned),
            state: supplied(state).map(ToOwned::to_owned),
        })
    }

    /// Whether the filter has no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asn.is_none() && self.prefix.is_none() && self.state.is_none()
    }

    /// Whether `record` satisfies every populated key.
    #[must_use]
    pub fn matches(&self, record: &RpkiRecord) -> bool {
        self.asn.map_or(true, |asn| record.asn == asn)
            && self.prefix.as_ref().map_or(true, |p| record.prefix == *p)
            && self.state.as_ref().map_or(true, |s| record.state == *s)
    }
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
