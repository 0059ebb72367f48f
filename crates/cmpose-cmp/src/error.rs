//! Error types for CMP parsing.

use thiserror::Error;

/// Errors that can occur when working with CMP files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON envelope could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] cmpose_common::Error),

    /// Invalid file extension.
    #[error("invalid file extension: expected {expected}, got {actual}")]
    InvalidExtension { expected: String, actual: String },

    /// Top-level JSON value is not an object.
    #[error("CMP document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Hex value does not hold exactly four encoded floats.
    #[error("expected {expected} hex digits after removing spaces, got {actual}")]
    DigitCount { expected: usize, actual: usize },

    /// Record value is a JSON type that cannot hold hex data.
    #[error("expected a hex string, got {0}")]
    UnexpectedType(&'static str),

    /// Raw byte buffer does not hold exactly four floats.
    #[error("expected {expected} bytes, got {actual}")]
    ByteCount { expected: usize, actual: usize },
}

/// Result type for CMP operations.
pub type Result<T> = std::result::Result<T, Error>;
