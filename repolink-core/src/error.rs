//! Error types for Repolink

use thiserror::Error;

/// Result type alias for Repolink operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Repolink operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git operation error
    #[error("Git error: {0}")]
    Git(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog store error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
