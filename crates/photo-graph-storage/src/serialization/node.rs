//! Photo node record encoding.
//!
//! The embedding is stored separately in the embeddings column family; the
//! record carries its length so a torn write can be detected on read.

use chrono::{DateTime, Utc};
use photo_graph_core::PhotoNode;
use serde::{Deserialize, Serialize};

use super::error::SerializationError;

/// Stored form of a [`PhotoNode`] without its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub identity: String,
    pub dimension: u32,
    pub ingested_at: DateTime<Utc>,
}

impl PhotoRecord {
    pub fn from_node(node: &PhotoNode) -> Self {
        Self {
            identity: node.identity.clone(),
            dimension: node.dimension() as u32,
            ingested_at: node.ingested_at,
        }
    }

    pub fn into_node(self, embedding: Vec<f64>) -> PhotoNode {
        PhotoNode {
            identity: self.identity,
            embedding,
            ingested_at: self.ingested_at,
        }
    }
}

pub fn serialize_node_record(record: &PhotoRecord) -> Result<Vec<u8>, SerializationError> {
    bincode::serialize(record).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

pub fn deserialize_node_record(bytes: &[u8]) -> Result<PhotoRecord, SerializationError> {
    Ok(bincode::deserialize(bytes)?)
}
