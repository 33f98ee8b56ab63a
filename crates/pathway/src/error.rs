//! Error types for pathway CLI operations.

use std::io;
use thiserror::Error;

/// The error type for pathway operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] pathway_catalog::Error),

    /// Plan file could not be read or written.
    #[error("Plan error: {0}")]
    Plan(String),

    /// Course not found in the catalog.
    #[error("Course not found: {0}")]
    CourseNotFound(String),

    /// Grade outside the 9-12 bands.
    #[error("Invalid grade {0}: expected 9, 10, 11, or 12")]
    InvalidGrade(u8),
}

/// A specialized Result type for pathway operations.
pub type Result<T> = std::result::Result<T, Error>;
