use thiserror::Error;
use uuid::Uuid;

/// Failures surfaced by storage operations.
///
/// Startup-time corruption (unreadable data file, unopenable database) is
/// recovered inside the backends and never reaches callers; these variants
/// cover normal-operation failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transaction {0} not found")]
    NotFound(Uuid),

    #[error("invalid transaction: {0}")]
    Validation(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("data file serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
