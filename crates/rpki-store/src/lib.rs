//! Storage layer for RPKI validation records.
//!
//! This crate provides persistent storage for [`RpkiRecord`]s with indexed
//! lookup by origin AS, by state, and by the (ASN, state) pair.
//!
//! # Backends
//!
//! - [`RocksStore`] (feature `rocksdb-backend`, on by default): column families
//!   `records`, `records_by_asn`, `records_by_state` and `records_by_asn_state`.
//! - [`MemoryStore`]: a map behind a lock, for tests and for running without
//!   `RocksDB`.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "rocksdb-backend")]
//! # fn main() {
//! use rpki_core::{NewRecord, RecordFilter, ValidationStatus};
//! use rpki_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/rpki-db").unwrap();
//!
//! store
//!     .create(NewRecord::new(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid))
//!     .unwrap();
//!
//! let records = store.find(&RecordFilter::new().with_asn(64512)).unwrap();
//! assert_eq!(records.len(), 1);
//! # }
//! # #[cfg(not(feature = "rocksdb-backend"))]
//! # fn main() {}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use rpki_core::{NewRecord, RecordFilter, RecordId, RpkiRecord};

/// The storage trait defining all record operations.
///
/// Backends implement the raw operations; [`Store::create`] layers
/// validation, timestamps and lifecycle logging on top of [`Store::insert`].
pub trait Store: Send + Sync {
    /// Persist an already-validated record together with its index entries.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateEntry` if a record with the same ID exists.
    /// - `StoreError::Database` / `StoreError::Serialization` on storage failure.
    fn insert(&self, record: &RpkiRecord) -> Result<()>;

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get(&self, id: &RecordId) -> Result<Option<RpkiRecord>>;

    /// Return every record matching all populated keys of `filter`, in ID
    /// order. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find(&self, filter: &RecordFilter) -> Result<Vec<RpkiRecord>>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count(&self) -> Result<usize>;

    /// Validate `input`, stamp it with the current time and persist it.
    ///
    /// Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if a required field is missing or the status
    ///   is outside the enum.
    /// - Any error from [`Store::insert`].
    fn create(&self, input: NewRecord) -> Result<RpkiRecord> {
        let record = input.into_record(chrono::Utc::now()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected RPKI record");
            StoreError::from(e)
        })?;

        tracing::debug!(
            id = %record.id,
            asn = %record.asn,
            state = %record.state,
            "Saving RPKI record"
        );

        if let Err(e) = self.insert(&record) {
            match &e {
                StoreError::DuplicateEntry { id } => {
                    tracing::error!(id = %id, "Duplicate RPKI record entry");
                }
                _ => tracing::error!(error = %e, "Error saving RPKI record"),
            }
            return Err(e);
        }

        tracing::info!(
            id = %record.id,
            asn = %record.asn,
            state = %record.state,
            "RPKI record saved"
        );

        Ok(record)
    }
}
