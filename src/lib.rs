// Library interface for testing

pub mod config;
pub mod constants;
pub mod credentials;
pub mod db;
pub mod error;
pub mod extract;
pub mod load;
pub mod model;
pub mod pipeline;
pub mod queries;
pub mod schema;
pub mod validate;
pub mod window;

pub use error::{EtlError, StorageError, ValidationError};
pub use load::LoadOutcome;
pub use model::{PlayEvent, PlayEventBatch};
