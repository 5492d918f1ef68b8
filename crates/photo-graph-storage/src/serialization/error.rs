//! Serialization error types.

use thiserror::Error;

/// Errors while encoding or decoding stored bytes.
///
/// Converted to [`StorageError::Serialization`](crate::StorageError::Serialization)
/// when propagated from storage operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SerializationError {
    #[error("Serialization failed: {0}")]
    SerializeFailed(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    /// Byte length is not a whole number of f64 values.
    #[error("Invalid embedding size: {actual} bytes is not a multiple of {element_size}")]
    InvalidEmbeddingSize { element_size: usize, actual: usize },

    /// Compound key without its NUL separator, or with invalid UTF-8.
    #[error("Malformed key: {0}")]
    MalformedKey(String),
}

impl From<bincode::Error> for SerializationError {
    fn from(e: bincode::Error) -> Self {
        SerializationError::DeserializeFailed(e.to_string())
    }
}
