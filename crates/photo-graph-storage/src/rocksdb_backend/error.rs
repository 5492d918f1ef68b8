//! Storage error types for the RocksDB backend.

use photo_graph_core::CoreError;
use thiserror::Error;

use crate::serialization::SerializationError;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database failed to open.
    #[error("Failed to open database at '{path}': {message}")]
    OpenFailed { path: String, message: String },

    /// Column family not found (should never happen if DB opened correctly).
    #[error("Column family '{name}' not found")]
    ColumnFamilyNotFound { name: String },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Flush failed: {0}")]
    FlushFailed(String),

    /// Node not found by identity.
    #[error("Node not found: {id}")]
    NotFound { id: String },

    /// An edge names an endpoint with no stored node.
    #[error("Edge endpoint '{identity}' is not a stored node")]
    MissingEndpoint { identity: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Column families disagree, e.g. a photo record without its embedding.
    #[error("Index '{index_name}' corrupted: {details}")]
    IndexCorrupted { index_name: String, details: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SerializationError> for StorageError {
    fn from(e: SerializationError) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Inconsistent or missing graph data is a store-state error; everything
/// else is a failed call to the store.
impl From<StorageError> for CoreError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { .. }
            | StorageError::MissingEndpoint { .. }
            | StorageError::IndexCorrupted { .. } => CoreError::StoreState(e.to_string()),
            other => CoreError::store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_endpoint_maps_to_store_state() {
        let err: CoreError = StorageError::MissingEndpoint {
            identity: "ghost.jpg".into(),
        }
        .into();
        assert!(matches!(err, CoreError::StoreState(ref m) if m.contains("ghost.jpg")));
    }

    #[test]
    fn test_write_failure_maps_to_external_call() {
        let err: CoreError = StorageError::WriteFailed("disk full".into()).into();
        match err {
            CoreError::ExternalCall {
                service, message, ..
            } => {
                assert_eq!(service, "graph-store");
                assert!(message.contains("disk full"));
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_serialization_error_conversion() {
        let err: StorageError = SerializationError::MalformedKey("x".into()).into();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
