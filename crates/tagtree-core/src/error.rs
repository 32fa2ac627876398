//! Error types for the tagtree registry.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using tagtree's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tagtree operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Required identifier column absent from the dataset
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Referenced external dataset handle cannot be located
    #[error("Dataset source not found: {0}")]
    SourceNotFound(String),

    /// Actor lacks the required capability
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A dataset has already been permanently ingested
    #[error("Dataset already ingested by {ingested_by} at {ingested_at}")]
    AlreadyIngested {
        ingested_at: DateTime<Utc>,
        ingested_by: String,
    },

    /// Input rejected before any write
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
