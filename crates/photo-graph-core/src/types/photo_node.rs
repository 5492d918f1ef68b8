//! Photo node: one ingested image and its embedding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EmbeddingVector, Identity};
use crate::error::{CoreError, CoreResult};

/// A node in the similarity graph.
///
/// Invariants enforced by [`PhotoNode::validate`]:
/// - identity is non-empty and contains no NUL byte
/// - embedding is non-empty and every component is finite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoNode {
    /// Unique identity within one dataset.
    pub identity: Identity,

    /// Fixed-length embedding produced by the model.
    pub embedding: EmbeddingVector,

    /// When the node was written.
    pub ingested_at: DateTime<Utc>,
}

impl PhotoNode {
    /// Creates a node stamped with the current time.
    pub fn new(identity: impl Into<Identity>, embedding: EmbeddingVector) -> Self {
        Self {
            identity: identity.into(),
            embedding,
            ingested_at: Utc::now(),
        }
    }

    /// Embedding length.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }

    /// Checks the node invariants.
    pub fn validate(&self) -> CoreResult<()> {
        validate_identity(&self.identity)?;

        if self.embedding.is_empty() {
            return Err(CoreError::InvalidEmbedding(format!(
                "node '{}' has an empty embedding",
                self.identity
            )));
        }

        if let Some((index, value)) = self
            .embedding
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            return Err(CoreError::InvalidEmbedding(format!(
                "node '{}' has non-finite value {} at index {}",
                self.identity, value, index
            )));
        }

        Ok(())
    }
}

/// Rejects identities the stores cannot key on.
pub fn validate_identity(identity: &str) -> CoreResult<()> {
    if identity.is_empty() {
        return Err(CoreError::StoreState("node identity must not be empty".into()));
    }
    if identity.contains('\0') {
        return Err(CoreError::StoreState(format!(
            "node identity {:?} contains a NUL byte",
            identity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_node() {
        let node = PhotoNode::new("img1.jpg", vec![0.6, 0.8]);
        assert_eq!(node.dimension(), 2);
        assert!(node.validate().is_ok());
    }

    #[test]
    fn test_empty_embedding_rejected() {
        let node = PhotoNode::new("img1.jpg", vec![]);
        assert!(matches!(
            node.validate(),
            Err(CoreError::InvalidEmbedding(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let node = PhotoNode::new("img1.jpg", vec![0.1, f64::NAN]);
        let err = node.validate().unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_bad_identity_rejected() {
        assert!(PhotoNode::new("", vec![1.0]).validate().is_err());
        assert!(PhotoNode::new("a\0b", vec![1.0]).validate().is_err());
    }

    #[test]
    fn test_zero_vector_is_valid() {
        assert!(PhotoNode::new("blank.png", vec![0.0; 4]).validate().is_ok());
    }
}
