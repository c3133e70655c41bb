//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid or corrupt stored data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;
