//! Error types for the metadata boundary

use thiserror::Error;

/// Core error type raised by metadata sources
#[derive(Error, Debug)]
pub enum SwordError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Metadata query error: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for metadata boundary operations
pub type Result<T> = std::result::Result<T, SwordError>;
