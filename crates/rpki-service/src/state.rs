//! Application state.

use std::sync::Arc;

use rpki_store::{MemoryStore, Store, StoreError};

use crate::config::{ServiceConfig, StoreBackend};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        Self { store, config }
    }
}

/// Open the store selected by `config.store_backend`.
///
/// # Errors
///
/// Returns an error if the `RocksDB` database cannot be opened, or if it was
/// requested in a build without the `rocksdb-backend` feature.
pub fn open_store(config: &ServiceConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - records will not persist");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StoreBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(rpki_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StoreBackend::RocksDb => Err(StoreError::Database(
            "built without the rocksdb-backend feature; set STORE_BACKEND=memory".into(),
        )),
    }
}
