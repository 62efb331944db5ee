//! Startup seeding from a JSON file of records.
//!
//! The file holds a JSON array of record objects in the API's wire format
//! (`ASN`, `prefix`, `state`, `validationStatus`, optional `id`). Entries that
//! fail validation, or whose `id` is already stored, are logged and skipped so
//! a restart with the same file is harmless.

use std::path::{Path, PathBuf};

use rpki_core::NewRecord;
use rpki_store::{Store, StoreError};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Records written.
    pub inserted: usize,
    /// Entries rejected by validation or already present.
    pub skipped: usize,
}

/// Errors that abort seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Path of the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The seed file is not a JSON array of records.
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        /// Path of the seed file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The store failed while writing.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read `path` and create every entry in `store`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the store
/// fails with a storage error. Per-entry validation and duplicate failures are
/// not errors.
pub fn seed_from_file(store: &dyn Store, path: &Path) -> Result<SeedSummary, SeedError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records: Vec<NewRecord> =
        serde_json::from_str(&contents).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), entries = records.len(), "Seeding RPKI records");

    Ok(seed_records(store, records)?)
}

/// Create every entry in `store`, skipping rejected ones.
///
/// # Errors
///
/// Returns the first storage error; earlier entries stay written.
pub fn seed_records(store: &dyn Store, records: Vec<NewRecord>) -> Result<SeedSummary, StoreError> {
    let mut summary = SeedSummary::default();

    for (index, record) in records.into_iter().enumerate() {
        match store.create(record) {
            Ok(_) => summary.inserted += 1,
            Err(e) if e.is_storage() => return Err(e),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping seed entry");
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Seeding complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpki_core::{RecordFilter, RecordId, RpkiRecord, ValidationStatus};
    use rpki_store::MemoryStore;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn seeds_valid_entries_and_skips_invalid() {
        let store = MemoryStore::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"ASN": 64512, "prefix": "192.0.2.0/24", "state": "CA", "validationStatus": "Valid"}},
                {{"ASN": 64512, "prefix": "198.51.100.0/24", "state": "NY", "validationStatus": "Maybe"}},
                {{"prefix": "203.0.113.0/24", "state": "TX", "validationStatus": "Unknown"}}
            ]"#
        )
        .unwrap();

        let summary = seed_from_file(&store, file.path()).unwrap();

        assert_eq!(summary, SeedSummary { inserted: 1, skipped: 2 });
        let records = store.find(&RecordFilter::new()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].validation_status, ValidationStatus::Valid);
    }

    #[test]
    fn reseeding_with_ids_is_idempotent() {
        let store = MemoryStore::new();
        let id = RecordId::generate();
        let entries =
            vec![NewRecord::new(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid).with_id(id)];

        assert_eq!(seed_records(&store, entries.clone()).unwrap().inserted, 1);
        assert_eq!(
            seed_records(&store, entries).unwrap(),
            SeedSummary { inserted: 0, skipped: 1 }
        );
        assert_eq!(store.count().unwrap(), 1);
    }

    /// Accepts the first write, then fails like a broken disk.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        writes: AtomicUsize,
    }

    impl Store for FlakyStore {
        fn insert(&self, record: &RpkiRecord) -> rpki_store::Result<()> {
            if self.writes.fetch_add(1, Ordering::SeqCst) > 0 {
                return Err(StoreError::Database("disk full".into()));
            }
            self.inner.insert(record)
        }

        fn get(&self, id: &RecordId) -> rpki_store::Result<Option<RpkiRecord>> {
            self.inner.get(id)
        }

        fn find(&self, filter: &RecordFilter) -> rpki_store::Result<Vec<RpkiRecord>> {
            self.inner.find(filter)
        }

        fn count(&self) -> rpki_store::Result<usize> {
            self.inner.count()
        }
    }

    #[test]
    fn storage_failure_aborts_seeding() {
        let store = FlakyStore::default();
        let entries = vec![
            NewRecord::new(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid),
            NewRecord::new(64512, "198.51.100.0/24", "NY", ValidationStatus::Invalid),
            NewRecord::new(65001, "203.0.113.0/24", "TX", ValidationStatus::Unknown),
        ];

        let err = seed_records(&store, entries).unwrap_err();

        assert!(matches!(err, StoreError::Database(_)));
        assert_eq!(store.writes.load(Ordering::SeqCst), 2);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let store = MemoryStore::new();
        let err = seed_from_file(&store, Path::new("/nonexistent/rpki-seed.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let store = MemoryStore::new();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ASN": 64512}}"#).unwrap();

        let err = seed_from_file(&store, file.path()).unwrap_err();
        assert!(matches!(err, SeedError::Parse { .. }));
    }
}
