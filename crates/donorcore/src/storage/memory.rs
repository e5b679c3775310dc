//! In-memory donor store, used by tests and by `DATABASE_PATH=:memory:`

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DonorStore, StoreError};
use crate::donor::{BloodGroup, DonorRecord};

/// Keeps records in insertion order for the lifetime of the process.
#[derive(Default)]
pub struct MemoryDonorStore {
    records: RwLock<Vec<DonorRecord>>,
}

impl MemoryDonorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Copy of every stored record
    pub async fn all(&self) -> Vec<DonorRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl DonorStore for MemoryDonorStore {
    async fn insert(&self, record: DonorRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn find_by_group(&self, group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.blood_group == group).cloned().collect())
    }

    async fn find_by_group_and_location(
        &self,
        group: BloodGroup,
        location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.blood_group == group && r.location_matches(location))
            .cloned()
            .collect())
    }
}
