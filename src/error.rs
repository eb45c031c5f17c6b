//! Error types for tend.

use thiserror::Error;

/// Errors that can occur while managing tasks.
///
/// The date core never produces these: unrecognised input there yields
/// `None`, an empty list, or an empty string.
#[derive(Debug, Error)]
pub enum TendError {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The task database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A task (or other item) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller asked for something that cannot be done.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<rusqlite::Error> for TendError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
