//! Error types for catalog loading.

use std::io;
use thiserror::Error;

/// The error type for catalog loading operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading a catalog file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing error for the document as a whole.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed as JSON but is not a recognizable catalog shape.
    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),
}

/// A specialized Result type for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;
