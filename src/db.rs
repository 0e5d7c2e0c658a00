//! SQLite storage for played tracks
//!
//! Async sqlx helpers plus a blocking `SyncDb` wrapper for the synchronous pipeline.

use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::future::Future;
use std::path::Path;
use tokio::runtime::Runtime;

use crate::error::StorageError;
use crate::model::PlayEvent;
use crate::queries::{ddl, songs};

/// Synchronous SQLite database wrapper that owns a runtime for blocking operations.
/// The pool is closed when the wrapper is dropped.
pub struct SyncDb {
    pool: SqlitePool,
    runtime: Runtime,
}

impl SyncDb {
    /// Open (creating if needed) the database file at `db_path`
    pub fn connect(db_path: &Path) -> Result<Self, StorageError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StorageError::Database(sqlx::Error::Io(e)))?;
        let pool = runtime.block_on(open_database_connection(db_path))?;
        debug!("Opened SQLite database: {}", db_path.display());
        Ok(Self { pool, runtime })
    }

    /// Block on an async future using the embedded runtime
    pub fn block_on<F, T>(&self, fut: F) -> Result<T, StorageError>
    where
        F: Future<Output = Result<T, StorageError>>,
    {
        self.runtime.block_on(fut)
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Drop for SyncDb {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
        debug!("Closed SQLite database");
    }
}

/// Open a file-based SQLite pool with a single connection, WAL mode
pub async fn open_database_connection(db_path: &Path) -> Result<SqlitePool, StorageError> {
    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the songs table if it does not exist
pub async fn init_database_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(&ddl::create_songs_table()).execute(pool).await?;
    Ok(())
}

/// Append all events in one statement. Returns the number of rows inserted.
///
/// A single multi-row INSERT is atomic, so a key conflict leaves the table untouched.
pub async fn insert_songs(pool: &SqlitePool, events: &[PlayEvent]) -> Result<u64, StorageError> {
    let Some(sql) = songs::insert_many(events) else {
        return Ok(0);
    };
    let result = sqlx::query(&sql).execute(pool).await?;
    Ok(result.rows_affected())
}

/// Count rows in the songs table
pub async fn count_songs(pool: &SqlitePool) -> Result<i64, StorageError> {
    let count: i64 = sqlx::query_scalar(&songs::count()).fetch_one(pool).await?;
    Ok(count)
}

/// Read every stored row, ordered by played_at
pub async fn select_all_songs(pool: &SqlitePool) -> Result<Vec<PlayEvent>, StorageError> {
    let rows = sqlx::query(&songs::select_all()).fetch_all(pool).await?;
    Ok(rows
        .iter()
        .map(|row| PlayEvent {
            artist: row.get(0),
            album: row.get(1),
            played_at: row.get(2),
            song_name: row.get(3),
        })
        .collect())
}

// ============================================================================
// Sync wrapper functions for use in blocking code
// These use SyncDb's embedded runtime to block on async operations
// ============================================================================

/// Sync wrapper: Initialize database schema
pub fn init_database_schema_sync(db: &SyncDb) -> Result<(), StorageError> {
    db.block_on(init_database_schema(db.pool()))
}

/// Sync wrapper: Insert a batch of songs
pub fn insert_songs_sync(db: &SyncDb, events: &[PlayEvent]) -> Result<u64, StorageError> {
    db.block_on(insert_songs(db.pool(), events))
}

/// Sync wrapper: Count songs
pub fn count_songs_sync(db: &SyncDb) -> Result<i64, StorageError> {
    db.block_on(count_songs(db.pool()))
}

/// Sync wrapper: Read all songs
pub fn select_all_songs_sync(db: &SyncDb) -> Result<Vec<PlayEvent>, StorageError> {
    db.block_on(select_all_songs(db.pool()))
}
