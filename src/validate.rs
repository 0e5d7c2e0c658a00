//! Validate stage: structural checks on an extracted batch

use chrono::{DateTime, Utc};
use log::{info, warn};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::model::PlayEventBatch;
use crate::window::played_at_date;

/// Check a batch before loading. Fails on the first violated rule.
///
/// An empty batch only logs a warning. The remaining rules run in order:
/// unique played_at values, every play dated on or after the window start,
/// and no empty fields.
pub fn validate(
    batch: &PlayEventBatch,
    window_start: DateTime<Utc>,
) -> Result<bool, ValidationError> {
    if batch.is_empty() {
        warn!("No plays found in the extraction window");
    }

    check_unique_keys(batch)?;
    check_window(batch, window_start)?;
    check_complete(batch)?;

    info!("Validation passed for {} plays", batch.len());
    Ok(true)
}

fn check_unique_keys(batch: &PlayEventBatch) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(batch.len());
    for event in batch.events() {
        if !seen.insert(event.played_at.as_str()) {
            return Err(ValidationError::DuplicateKey {
                played_at: event.played_at.clone(),
            });
        }
    }
    Ok(())
}

/// Compares at day granularity: the time of day of both sides is ignored.
fn check_window(
    batch: &PlayEventBatch,
    window_start: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let start_date = window_start.date_naive();
    for (index, event) in batch.events().iter().enumerate() {
        // Left for the completeness check
        if event.played_at.is_empty() {
            continue;
        }
        let date = played_at_date(&event.played_at).ok_or_else(|| {
            ValidationError::MalformedTimestamp {
                index,
                played_at: event.played_at.clone(),
            }
        })?;
        if date < start_date {
            return Err(ValidationError::StaleRecord {
                played_at: event.played_at.clone(),
                window_start: start_date,
            });
        }
    }
    Ok(())
}

fn check_complete(batch: &PlayEventBatch) -> Result<(), ValidationError> {
    for (index, event) in batch.events().iter().enumerate() {
        if let Some((field, _)) = event
            .fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(ValidationError::IncompleteRecord { index, field });
        }
    }
    Ok(())
}
