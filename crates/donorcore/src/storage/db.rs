use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::Type;
use rusqlite::{params, Row};

use super::{DonorStore, StoreError};
use crate::core::config::validate_table_name;
use crate::donor::{BloodGroup, DonorRecord};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a new database connection pool
///
/// # Arguments
///
/// * `database_path` - Path to SQLite database file
///
/// # Returns
///
/// Returns a `DbPool` on success or an `r2d2::Error` if pool creation fails.
///
/// # Example
///
/// ```no_run
/// use donorcore::storage::create_pool;
///
/// let pool = create_pool("donors.sqlite")?;
/// # Ok::<(), r2d2::Error>(())
/// ```
pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::file(database_path).with_init(|conn| conn.busy_timeout(BUSY_TIMEOUT));
    Pool::builder()
        .max_size(10) // Maximum 10 connections in the pool
        .build(manager)
}

/// Get a connection from the pool
///
/// The connection is returned to the pool when dropped.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, r2d2::Error> {
    pool.get()
}

/// Create the donor table and its index if they don't exist yet
fn ensure_schema(conn: &rusqlite::Connection, table: &str) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            location TEXT NOT NULL,
            blood_group TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            registered_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_{table}_blood_group ON {table} (blood_group);"
    ))
}

fn donor_from_row(row: &Row<'_>) -> rusqlite::Result<DonorRecord> {
    let group: String = row.get(4)?;
    let blood_group =
        BloodGroup::from_str(&group).map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    let registered_at: String = row.get(6)?;
    let registered_at = DateTime::parse_from_rfc3339(&registered_at)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(DonorRecord {
        name: row.get(0)?,
        phone: row.get(1)?,
        email: row.get(2)?,
        location: row.get(3)?,
        blood_group,
        user_id: row.get(5)?,
        registered_at,
    })
}

/// SQLite-backed donor store.
///
/// SQLite calls block, so every operation runs on tokio's blocking pool.
/// Rows come back in insertion order.
#[derive(Clone)]
pub struct SqliteDonorStore {
    pool: DbPool,
    table: Arc<str>,
}

impl SqliteDonorStore {
    /// Opens the store and makes sure the table exists.
    ///
    /// # Errors
    /// * `AppError::Config` - `table` is not a plain identifier
    /// * `AppError::Store` - the database could not be opened or migrated
    pub fn open(database_path: &str, table: &str) -> crate::AppResult<Self> {
        let pool = create_pool(database_path).map_err(StoreError::from)?;
        Self::with_pool(pool, table)
    }

    /// Wraps an existing pool.
    pub fn with_pool(pool: DbPool, table: &str) -> crate::AppResult<Self> {
        validate_table_name(table)?;

        let conn = get_connection(&pool).map_err(StoreError::from)?;
        ensure_schema(&conn, table).map_err(StoreError::from)?;
        log::info!("Donor store ready (table: {})", table);

        Ok(Self {
            pool,
            table: Arc::from(table),
        })
    }

    async fn select_group(&self, group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        let pool = self.pool.clone();
        let table = Arc::clone(&self.table);

        tokio::task::spawn_blocking(move || -> Result<Vec<DonorRecord>, StoreError> {
            let conn = get_connection(&pool)?;
            let mut stmt = conn.prepare(&format!(
                "SELECT name, phone, email, location, blood_group, user_id, registered_at
                 FROM {table} WHERE blood_group = ?1 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![group.label()], donor_from_row)?;

            let mut donors = Vec::new();
            for row in rows {
                donors.push(row?);
            }
            Ok(donors)
        })
        .await?
    }
}

#[async_trait]
impl DonorStore for SqliteDonorStore {
    async fn insert(&self, record: DonorRecord) -> Result<(), StoreError> {
        let pool = self.pool.clone();
        let table = Arc::clone(&self.table);

        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let conn = get_connection(&pool)?;
            conn.execute(
                &format!(
                    "INSERT INTO {table} (name, phone, email, location, blood_group, user_id, registered_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                params![
                    record.name,
                    record.phone,
                    record.email,
                    record.location,
                    record.blood_group.label(),
                    record.user_id,
                    record.registered_at.to_rfc3339(),
                ],
            )?;
            log::debug!("Inserted donor for user {} ({})", record.user_id, record.blood_group);
            Ok(())
        })
        .await?
    }

    async fn find_by_group(&self, group: BloodGroup) -> Result<Vec<DonorRecord>, StoreError> {
        self.select_group(group).await
    }

    async fn find_by_group_and_location(
        &self,
        group: BloodGroup,
        location: &str,
    ) -> Result<Vec<DonorRecord>, StoreError> {
        // SQLite's LOWER() only folds ASCII, so the location filter runs here.
        let donors = self.select_group(group).await?;
        Ok(donors.into_iter().filter(|d| d.location_matches(location)).collect())
    }
}
