//! Key encoding utilities for `RocksDB`.
//!
//! Index keys are the indexed value followed by the 16-byte record ID, so a
//! prefix scan over the value yields every matching record in ID order.
//! Strings are length-prefixed so that the scan for `"CA"` never picks up
//! entries for `"CAL"`.

use rpki_core::{Asn, RecordId};

/// Length of an encoded record ID.
pub const RECORD_ID_LEN: usize = 16;

/// Create a primary key from a record ID.
#[must_use]
pub fn record_key(id: &RecordId) -> Vec<u8> {
    id.to_bytes().to_vec()
}

/// Prefix covering every ASN index entry for `asn`.
#[must_use]
pub fn asn_prefix(asn: Asn) -> Vec<u8> {
    asn.to_be_bytes().to_vec()
}

/// Create an ASN index key.
///
/// Format: `asn (4 bytes, big-endian) || record_id (16 bytes)`
#[must_use]
pub fn asn_key(asn: Asn, id: &RecordId) -> Vec<u8> {
    with_id(asn_prefix(asn), id)
}

/// Prefix covering every state index entry for `state`.
#[must_use]
pub fn state_prefix(state: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(4 + state.len() + RECORD_ID_LEN);
    push_str(&mut key, state);
    key
}

/// Create a state index key.
///
/// Format: `len (4 bytes, big-endian) || state || record_id (16 bytes)`
#[must_use]
pub fn state_key(state: &str, id: &RecordId) -> Vec<u8> {
    with_id(state_prefix(state), id)
}

/// Prefix covering every compound index entry for `(asn, state)`.
#[must_use]
pub fn asn_state_prefix(asn: Asn, state: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + state.len() + RECORD_ID_LEN);
    key.extend_from_slice(&asn.to_be_bytes());
    push_str(&mut key, state);
    key
}

/// Create a compound (ASN, state) index key.
///
/// Format: `asn (4 bytes) || len (4 bytes) || state || record_id (16 bytes)`
#[must_use]
pub fn asn_state_key(asn: Asn, state: &str, id: &RecordId) -> Vec<u8> {
    with_id(asn_state_prefix(asn, state), id)
}

/// Extract the record ID from the tail of an index key.
///
/// Returns `None` if the key is shorter than a record ID.
#[must_use]
pub fn extract_record_id(key: &[u8]) -> Option<RecordId> {
    let start = key.len().checked_sub(RECORD_ID_LEN)?;
    let bytes: [u8; RECORD_ID_LEN] = key[start..].try_into().ok()?;
    Some(RecordId::from_bytes(bytes))
}

#[allow(clippy::cast_possible_truncation)]
fn push_str(key: &mut Vec<u8>, value: &str) {
    key.extend_from_slice(&(value.len() as u32).to_be_bytes());
    key.extend_from_slice(value.as_bytes());
}

fn with_id(mut key: Vec<u8>, id: &RecordId) -> Vec<u8> {
    key.extend_from_slice(&id.to_bytes());
    key
}
