//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary record documents, keyed by `record_id` (ULID).
    pub const RECORDS: &str = "records";

    /// Index: records by origin AS, keyed by `asn || record_id`.
    /// Value is empty (index only).
    pub const RECORDS_BY_ASN: &str = "records_by_asn";

    /// Index: records by state, keyed by `len(state) || state || record_id`.
    /// Value is empty (index only).
    pub const RECORDS_BY_STATE: &str = "records_by_state";

    /// Compound index over (ASN, state), keyed by
    /// `asn || len(state) || state || record_id`. Not unique.
    pub const RECORDS_BY_ASN_STATE: &str = "records_by_asn_state";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::RECORDS,
        cf::RECORDS_BY_ASN,
        cf::RECORDS_BY_STATE,
        cf::RECORDS_BY_ASN_STATE,
    ]
}
