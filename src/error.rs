//! Error types for the farm store.

use thiserror::Error;

/// Main error type for store transitions.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("No current record: logs are empty")]
    NoCurrentRecord,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid format string: {0}")]
    InvalidFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store transitions.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Check that `index` addresses an element of a sequence of length `len`.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::IndexOutOfRange { index, len })
    }
}
