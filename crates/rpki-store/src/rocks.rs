//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use rpki_core::{RecordFilter, RecordId, RpkiRecord};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Serializes the duplicate-id check with the batch write.
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Load every record referenced by index entries under `prefix`.
    fn scan_index(&self, index: &str, prefix: &[u8]) -> Result<Vec<RpkiRecord>> {
        let cf_index = self.cf(index)?;
        let iter = self
            .db
            .iterator_cf(&cf_index, IteratorMode::From(prefix, Direction::Forward));

        let mut records = Vec::new();
        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(prefix) {
                break;
            }

            let id = keys::extract_record_id(&key)
                .ok_or_else(|| StoreError::Database(format!("malformed {index} key")))?;

            match self.get(&id)? {
                Some(record) => records.push(record),
                None => tracing::warn!(index, id = %id, "Index entry without record"),
            }
        }

        Ok(records)
    }

    /// Load every record in ID order.
    fn scan_records(&self) -> Result<Vec<RpkiRecord>> {
        let cf_records = self.cf(cf::RECORDS)?;

        self.db
            .iterator_cf(&cf_records, IteratorMode::Start)
            .map(|item| {
                let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                Self::deserialize(&value)
            })
            .collect()
    }
}

impl Store for RocksStore {
    fn insert(&self, record: &RpkiRecord) -> Result<()> {
        let cf_records = self.cf(cf::RECORDS)?;
        let cf_by_asn = self.cf(cf::RECORDS_BY_ASN)?;
        let cf_by_state = self.cf(cf::RECORDS_BY_STATE)?;
        let cf_by_asn_state = self.cf(cf::RECORDS_BY_ASN_STATE)?;

        let key = keys::record_key(&record.id);
        let value = Self::serialize(record)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Database("write lock poisoned".into()))?;

        let exists = self
            .db
            .get_pinned_cf(&cf_records, &key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .is_some();
        if exists {
            return Err(StoreError::DuplicateEntry { id: record.id });
        }

        // Record and index entries land together or not at all.
        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_records, &key, &value);
        batch.put_cf(&cf_by_asn, keys::asn_key(record.asn, &record.id), []);
        batch.put_cf(
            &cf_by_state,
            keys::state_key(&record.state, &record.id),
            [],
        );
        batch.put_cf(
            &cf_by_asn_state,
            keys::asn_state_key(record.asn, &record.state, &record.id),
            [],
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get(&self, id: &RecordId) -> Result<Option<RpkiRecord>> {
        let cf = self.cf(cf::RECORDS)?;
        let key = keys::record_key(id);

        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find(&self, filter: &RecordFilter) -> Result<Vec<RpkiRecord>> {
        let index = match (filter.asn, filter.state.as_deref()) {
            (Some(asn), Some(state)) => Some((
                cf::RECORDS_BY_ASN_STATE,
                keys::asn_state_prefix(asn, state),
            )),
            (Some(asn), None) => Some((cf::RECORDS_BY_ASN, keys::asn_prefix(asn))),
            (None, Some(state)) => Some((cf::RECORDS_BY_STATE, keys::state_prefix(state))),
            (None, None) => None,
        };

        let candidates = match index {
            Some((name, prefix)) => self.scan_index(name, &prefix)?,
            None => self.scan_records()?,
        };

        // Prefix is never indexed; it is applied here along with a recheck of
        // the indexed keys.
        Ok(candidates
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect())
    }

    fn count(&self) -> Result<usize> {
        let cf = self.cf(cf::RECORDS)?;

        let mut count = 0;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            item.map_err(|e| StoreError::Database(e.to_string()))?;
            count += 1;
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use rpki_core::{NewRecord, ValidationStatus};
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn create_then_find_by_asn() {
        let (store, _dir) = create_test_store();
        test_support::create_then_find_by_asn(&store);
    }

    #[test]
    fn filters_combine_with_and() {
        let (store, _dir) = create_test_store();
        test_support::filters_combine_with_and(&store);
    }

    #[test]
    fn no_match_is_empty() {
        let (store, _dir) = create_test_store();
        test_support::no_match_is_empty(&store);
    }

    #[test]
    fn results_in_creation_order() {
        let (store, _dir) = create_test_store();
        test_support::results_in_creation_order(&store);
    }

    #[test]
    fn invalid_status_is_not_persisted() {
        let (store, _dir) = create_test_store();
        test_support::invalid_status_is_not_persisted(&store);

        // No orphaned index entries either.
        let cf = store.cf(cf::RECORDS_BY_ASN).unwrap();
        assert_eq!(store.db.iterator_cf(&cf, IteratorMode::Start).count(), 0);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let (store, _dir) = create_test_store();
        test_support::duplicate_id_is_rejected(&store);
    }

    #[test]
    fn concurrent_creates_with_same_id_admit_one() {
        let (store, _dir) = create_test_store();
        test_support::concurrent_creates_with_same_id_admit_one(&store);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();

        let created = {
            let store = RocksStore::open(dir.path()).unwrap();
            store
                .create(NewRecord::new(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid))
                .unwrap()
        };

        let store = RocksStore::open(dir.path()).unwrap();
        let found = store
            .find(&RecordFilter::new().with_asn(64512).with_state("CA"))
            .unwrap();
        assert_eq!(found, vec![created]);
    }

    #[test]
    fn dangling_index_entry_is_skipped() {
        let (store, _dir) = create_test_store();
        let kept = store
            .create(NewRecord::new(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid))
            .unwrap();

        let cf = store.cf(cf::RECORDS_BY_STATE).unwrap();
        store
            .db
            .put_cf(&cf, keys::state_key("CA", &RecordId::generate()), [])
            .unwrap();

        let found = store.find(&RecordFilter::new().with_state("CA")).unwrap();
        assert_eq!(found, vec![kept]);
    }
}
