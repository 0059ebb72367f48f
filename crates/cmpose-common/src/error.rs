//! Error types for cmpose-common.

use thiserror::Error;

/// Common error type for cmpose operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Input too short to hold the 2-character marker.
    #[error("hex word {0:?} is missing its 2-character prefix")]
    MissingPrefix(String),

    /// Digit portion cannot be split into whole bytes.
    #[error("hex word has an odd number of digits: {0}")]
    OddDigitCount(usize),

    /// Digit portion does not match the declared byte count.
    #[error("expected {expected} hex digits, got {actual}")]
    DigitCountMismatch { expected: usize, actual: usize },

    /// Character outside `[0-9a-fA-F]`.
    #[error("invalid hex digits: {0:?}")]
    InvalidHexDigit(String),

    /// Value length is not a multiple of the group width.
    #[error("{len} hex digits cannot be split into groups of {width}")]
    RaggedGroups { len: usize, width: usize },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
