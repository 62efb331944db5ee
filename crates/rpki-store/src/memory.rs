//! In-memory storage implementation.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rpki_core::{RecordFilter, RecordId, RpkiRecord};

use crate::error::{Result, StoreError};
use crate::Store;

/// Map-backed storage. Records live as long as the store.
///
/// Lookups scan the map; there are no secondary indexes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<BTreeMap<RecordId, RpkiRecord>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<RecordId, RpkiRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Database("record map lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<RecordId, RpkiRecord>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Database("record map lock poisoned".into()))
    }
}

impl Store for MemoryStore {
    fn insert(&self, record: &RpkiRecord) -> Result<()> {
        let mut records = self.write()?;
        if records.contains_key(&record.id) {
            return Err(StoreError::DuplicateEntry { id: record.id });
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    fn get(&self, id: &RecordId) -> Result<Option<RpkiRecord>> {
        Ok(self.read()?.get(id).cloned())
    }

    fn find(&self, filter: &RecordFilter) -> Result<Vec<RpkiRecord>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
