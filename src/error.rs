// src/error.rs

//! Crate-wide error type and result alias.
//!
//! Conversion failures are NOT errors: a converter that produces no
//! output classifies as `ConversionOutcome::Failed` and is absorbed into
//! the sweep summary. Only failures that would silently lose data or
//! abort a sweep surface here.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers
#[derive(Debug, Error)]
pub enum Error {
    /// Generic I/O failure with context
    #[error("I/O error: {0}")]
    IoError(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Handshake directory missing or unreadable; the sweep aborts
    /// before processing any file
    #[error("Directory scan failed: {0}")]
    DirectoryError(String),

    /// Registry file could not be written; fatal for that update cycle
    #[error("Registry write failed: {0}")]
    RegistryError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
