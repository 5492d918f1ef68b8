//! Similarity edge record encoding.

use serde::{Deserialize, Serialize};

use super::error::SerializationError;

/// Value stored under an edge key. Endpoints live in the key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub weight: f64,
}

pub fn serialize_edge(record: &EdgeRecord) -> Result<Vec<u8>, SerializationError> {
    bincode::serialize(record).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

pub fn deserialize_edge(bytes: &[u8]) -> Result<EdgeRecord, SerializationError> {
    Ok(bincode::deserialize(bytes)?)
}
