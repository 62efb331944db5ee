//! Common test utilities for rpki-service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use rpki_core::{NewRecord, RecordFilter, RecordId, RpkiRecord, ValidationStatus};
use rpki_service::{create_router, AppState, ServiceConfig, StoreBackend};
use rpki_store::{MemoryStore, Store, StoreError};

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server, for seeding.
    pub store: Arc<dyn Store>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a test harness over the given store.
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            store_backend: StoreBackend::Memory,
            ..ServiceConfig::default()
        };

        let state = AppState::new(Arc::clone(&store), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, store }
    }

    /// Create a harness holding the two-record scenario:
    /// `64512 192.0.2.0/24 CA Valid` and `64512 198.51.100.0/24 NY Invalid`.
    pub fn with_scenario() -> Self {
        let harness = Self::new();
        harness.create(64512, "192.0.2.0/24", "CA", ValidationStatus::Valid);
        harness.create(64512, "198.51.100.0/24", "NY", ValidationStatus::Invalid);
        harness
    }

    /// Create a record directly in the store.
    pub fn create(
        &self,
        asn: u32,
        prefix: &str,
        state: &str,
        status: ValidationStatus,
    ) -> RpkiRecord {
        self.store
            .create(NewRecord::new(asn, prefix, state, status))
            .expect("Failed to create record")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A store whose every operation fails, for exercising the 500 path.
pub struct FailingStore;

impl Store for FailingStore {
    fn insert(&self, _record: &RpkiRecord) -> rpki_store::Result<()> {
        Err(StoreError::Database("storage unavailable".into()))
    }

    fn get(&self, _id: &RecordId) -> rpki_store::Result<Option<RpkiRecord>> {
        Err(StoreError::Database("storage unavailable".into()))
    }

    fn find(&self, _filter: &RecordFilter) -> rpki_store::Result<Vec<RpkiRecord>> {
        Err(StoreError::Database("storage unavailable".into()))
    }

    fn count(&self) -> rpki_store::Result<usize> {
        Err(StoreError::Database("storage unavailable".into()))
    }
}
