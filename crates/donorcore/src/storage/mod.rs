//! Donor storage: the `DonorStore` trait and its backends

pub mod db;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::donor::{BloodGroup, DonorRecord};

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool, SqliteDonorStore};
pub use memory::MemoryDonorStore;

/// Errors raised by a donor store.
///
/// Any of these means the operation did not happen; callers must not
/// assume partial success.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("store worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Persistence for donor records.
///
/// Results come back fully materialized; the order is backend-defined and
/// callers must not rely on it.
#[async_trait]
pub trait DonorStore: Send + Sync {
    /// Appends a record. Duplicates (same user, same data) are allowed.
    async fn insert(&self, record: DonorRecord) -> Result<(), StoreError>;

    /// All donors of exactly `group`.
    async fn find_by_group(&self, group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError>;

    /// Donors of exactly `group` whose location contains `location`,
    /// ignoring case.
    async fn find_by_group_and_location(
        &self,
        group: BloodGroup,
        location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError>;
}
