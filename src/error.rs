//! Error types for sorrel.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SorrelError>;

/// Error type for corpus loading, vector construction, and persistence.
///
/// Empty inputs (empty query, empty relevant-document set, zero-norm vector)
/// are not errors anywhere in this crate; they produce well-defined empty
/// results instead.
#[derive(Error, Debug)]
pub enum SorrelError {
    /// Vocabulary/statistics inconsistency, e.g. a vector-space term with
    /// zero document frequency. Unreachable on a correctly loaded corpus;
    /// treated as fatal rather than recoverable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied argument was invalid (unknown doc_id, out-of-order
    /// corpus load, mismatched store).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A persisted catalog or vector store could not be used.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// I/O failure at the persistence boundary.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure at the persistence boundary.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SorrelError {
    /// Create a configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        SorrelError::Configuration(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        SorrelError::InvalidArgument(message.into())
    }

    /// Create a persistence error.
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        SorrelError::Persistence(message.into())
    }
}
