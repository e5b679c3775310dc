//! Shared fixtures for donorcore integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use donorcore::storage::{DonorStore, MemoryDonorStore, StoreError};
use donorcore::{BloodGroup, DonorRecord, FlowEngine, SessionStore};

/// Wraps a memory store and counts every call made to it.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryDonorStore,
    pub inserts: AtomicUsize,
    pub queries: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst) + self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DonorStore for CountingStore {
    async fn insert(&self, record: DonorRecord) -> Result<(), StoreError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(record).await
    }

    async fn find_by_group(&self, group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_group(group).await
    }

    async fn find_by_group_and_location(
        &self,
        group: BloodGroup,
        location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_group_and_location(group, location).await
    }
}

/// A store whose backing database is gone.
pub struct FailingStore;

#[async_trait]
impl DonorStore for FailingStore {
    async fn insert(&self, _record: DonorRecord) -> Result<(), StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }

    async fn find_by_group(&self, _group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }

    async fn find_by_group_and_location(
        &self,
        _group: BloodGroup,
        _location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError> {
        Err(StoreError::Database(rusqlite::Error::InvalidQuery))
    }
}

pub fn engine_with<S: DonorStore + 'static>(store: Arc<S>) -> FlowEngine {
    FlowEngine::new(store, Arc::new(SessionStore::new()))
}

pub fn donor(name: &str, group: BloodGroup, location: &str) -> DonorRecord {
    DonorRecord {
        name: name.to_string(),
        phone: format!("+1 555 {}", name.len()),
        email: format!("{}@example.org", name.to_lowercase()),
        location: location.to_string(),
        blood_group: group,
        user_id: 1000,
        registered_at: Utc::now(),
    }
}
