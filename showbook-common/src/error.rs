//! Common error types for Showbook

use thiserror::Error;

/// Common result type for Showbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error classification shared by the store and the web layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error); the enclosing
    /// transaction has been rolled back by the time this is observed
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed value read back from the store or supplied by a caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when the error means "the referenced record does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
