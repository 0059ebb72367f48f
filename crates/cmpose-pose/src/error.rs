//! Error types for pose conversion.

use thiserror::Error;

/// Errors that can occur when building or writing pose files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CMP library error.
    #[error("{0}")]
    Cmp(#[from] cmpose_cmp::Error),

    /// Invalid file extension.
    #[error("invalid file extension: expected {expected}, got {actual}")]
    InvalidExtension { expected: String, actual: String },

    /// A bone record could not be decoded and the conversion is strict.
    #[error("{0}")]
    MalformedRecord(#[from] MalformedRecordError),
}

/// A bone record whose value cannot become a rotation.
///
/// Raised per record; the converter decides whether it aborts the batch.
#[derive(Debug, Error)]
#[error("malformed record {source_name:?}: {reason}")]
pub struct MalformedRecordError {
    source_name: String,
    reason: MalformedReason,
}

impl MalformedRecordError {
    /// Create a new error for a record.
    pub fn new(source_name: impl Into<String>, reason: MalformedReason) -> Self {
        Self {
            source_name: source_name.into(),
            reason,
        }
    }

    /// Get the CMP identifier of the offending record.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Get the reason the record was rejected.
    pub fn reason(&self) -> &MalformedReason {
        &self.reason
    }
}

/// Why a bone record was rejected.
#[derive(Debug, Error)]
pub enum MalformedReason {
    /// The hex value could not be decoded.
    #[error(transparent)]
    Decode(#[from] cmpose_cmp::Error),

    /// A component decoded to infinity or NaN.
    #[error("component {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
}

/// Result type for pose operations.
pub type Result<T> = std::result::Result<T, Error>;
