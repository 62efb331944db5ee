//! Autonomous System Numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An Autonomous System Number (32-bit, RFC 6793).
///
/// Serialized as a bare JSON number. Parsing accepts the plain decimal form
/// (`64512`) as well as the conventional `AS64512` notation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asn(u32);

impl Asn {
    /// Create an ASN from its numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Return the numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Big-endian encoding, used for ordered index keys.
    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl From<u32> for Asn {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Asn> for u32 {
    fn from(asn: Asn) -> Self {
        asn.0
    }
}

impl FromStr for Asn {
    type Err = ParseAsnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("AS")
            .or_else(|| trimmed.strip_prefix("as"))
            .unwrap_or(trimmed);

        digits.parse::<u32>().map(Self).map_err(|_| ParseAsnError {
            input: s.to_string(),
        })
    }
}

impl fmt::Debug for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl fmt::Display for Asn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The input could not be read as a 32-bit ASN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ASN: {input:?}")]
pub struct ParseAsnError {
    /// The rejected input, as received.
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_prefixed_forms() {
        assert_eq!("64512".parse::<Asn>().unwrap(), Asn::new(64512));
        assert_eq!("AS64512".parse::<Asn>().unwrap(), Asn::new(64512));
        assert_eq!("as13335".parse::<Asn>().unwrap(), Asn::new(13335));
        assert_eq!(" 4200000000 ".parse::<Asn>().unwrap(), Asn::new(4_200_000_000));
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range() {
        for input in ["", "abc", "-1", "64512.5", "AS", "4294967296", "12 34"] {
            let err = input.parse::<Asn>().unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Asn::new(64512)).unwrap(), "64512");
        let asn: Asn = serde_json::from_str("65000").unwrap();
        assert_eq!(asn.value(), 65000);
    }
}
