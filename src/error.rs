use thiserror::Error;

/// Fatal pipeline errors. Anything returned from `pipeline::run` as `Err`
/// aborts the run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Structural problems found in an extracted batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Primary key uniqueness is compromised: played_at '{played_at}' appears more than once")]
    DuplicateKey { played_at: String },

    #[error("Record played at '{played_at}' is older than the window start {window_start}")]
    StaleRecord {
        played_at: String,
        window_start: chrono::NaiveDate,
    },

    #[error("Record {index} has an empty '{field}' field")]
    IncompleteRecord { index: usize, field: &'static str },

    #[error("Record {index} has an unparseable played_at '{played_at}'")]
    MalformedTimestamp { index: usize, played_at: String },
}

/// Storage-layer failures, split so the loader can swallow key conflicts
/// while still propagating real faults.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Primary key conflict: {0}")]
    Conflict(sqlx::Error),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        let is_conflict = e
            .as_database_error()
            .map(|db_err| db_err.is_unique_violation())
            .unwrap_or(false);
        if is_conflict {
            StorageError::Conflict(e)
        } else {
            StorageError::Database(e)
        }
    }
}

impl StorageError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::Conflict(_))
    }
}
