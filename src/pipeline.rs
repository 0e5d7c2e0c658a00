//! Extract -> validate -> load, run once

use chrono::{DateTime, Utc};
use log::info;

use crate::config::EtlConfig;
use crate::error::EtlError;
use crate::extract::fetch_recently_played;
use crate::load::{load_batch, LoadOutcome};
use crate::validate::validate;
use crate::window::window_start;

/// Run every stage once against the reference time `now`
///
/// Any error aborts the run before the next stage starts. A key conflict
/// during the load is not an error and comes back as `LoadOutcome::AlreadyLoaded`.
pub fn run(config: &EtlConfig, now: DateTime<Utc>) -> Result<LoadOutcome, EtlError> {
    let batch = fetch_recently_played(config, now)?;

    validate(&batch, window_start(now))?;

    let outcome = load_batch(batch, config.db_path())?;
    info!("Run finished: {:?}", outcome);
    Ok(outcome)
}
