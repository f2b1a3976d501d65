//! Tutormind error types

use thiserror::Error;

/// Tutormind error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Upstream text-generation error
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for tutormind operations
pub type Result<T> = std::result::Result<T, Error>;
