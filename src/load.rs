//! Load stage: append a validated batch to the songs table

use log::info;
use std::path::Path;

use crate::db::{self, SyncDb};
use crate::error::{EtlError, StorageError};
use crate::model::PlayEventBatch;

/// Result of a load that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The batch was inserted; holds the number of rows appended
    Appended(u64),
    /// At least one played_at already exists, so the whole batch was skipped
    AlreadyLoaded,
}

/// Open the database at `db_path`, ensure the table exists and append the batch
///
/// The connection is released when this function returns, on every path.
pub fn load_batch(batch: PlayEventBatch, db_path: &Path) -> Result<LoadOutcome, EtlError> {
    let db = SyncDb::connect(db_path)?;
    Ok(load_into(&db, batch)?)
}

/// Append a batch using an already open database
pub fn load_into(db: &SyncDb, batch: PlayEventBatch) -> Result<LoadOutcome, StorageError> {
    db::init_database_schema_sync(db)?;

    match db::insert_songs_sync(db, batch.events()) {
        Ok(rows) => {
            info!("Appended {} plays", rows);
            Ok(LoadOutcome::Appended(rows))
        }
        Err(e) if e.is_conflict() => {
            info!("Data exists already, skipping batch of {} plays ({})", batch.len(), e);
            Ok(LoadOutcome::AlreadyLoaded)
        }
        Err(e) => Err(e),
    }
}
