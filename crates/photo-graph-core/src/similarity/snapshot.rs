//! Immutable, validated view of the node set.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::{EmbeddingVector, Identity, PhotoNode};

use super::cosine::l2_norm;

/// Snapshot of `(identity, embedding)` pairs taken once the node set is
/// complete.
///
/// Construction sorts by identity, rejects duplicate identities, checks that
/// every embedding has the same length and precomputes norms. Nothing can
/// mutate it afterwards, so a similarity pass never observes a partial node set.
#[derive(Debug, Clone)]
pub struct NodeSnapshot {
    identities: Vec<Identity>,
    embeddings: Vec<EmbeddingVector>,
    norms: Vec<f64>,
    dimension: usize,
}

impl NodeSnapshot {
    /// Builds a snapshot from store contents.
    ///
    /// # Errors
    ///
    /// - `CoreError::DimensionMismatch` if embedding lengths differ
    /// - `CoreError::StoreState` if an identity appears twice
    pub fn new(mut nodes: Vec<PhotoNode>) -> CoreResult<Self> {
        nodes.sort_by(|a, b| a.identity.cmp(&b.identity));

        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.identity.as_str()) {
                return Err(CoreError::StoreState(format!(
                    "identity '{}' appears more than once in the node set",
                    node.identity
                )));
            }
        }

        let dimension = nodes.first().map(PhotoNode::dimension).unwrap_or(0);
        if let Some(bad) = nodes.iter().find(|n| n.dimension() != dimension) {
            return Err(CoreError::DimensionMismatch {
                context: format!("node '{}'", bad.identity),
                expected: dimension,
                actual: bad.dimension(),
            });
        }

        let mut identities = Vec::with_capacity(nodes.len());
        let mut embeddings = Vec::with_capacity(nodes.len());
        let mut norms = Vec::with_capacity(nodes.len());
        for node in nodes {
            norms.push(l2_norm(&node.embedding));
            identities.push(node.identity);
            embeddings.push(node.embedding);
        }

        Ok(Self {
            identities,
            embeddings,
            norms,
            dimension,
        })
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Shared embedding length, 0 for an empty snapshot.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Identities in ascending order.
    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub(crate) fn embedding(&self, index: usize) -> &[f64] {
        &self.embeddings[index]
    }

    pub(crate) fn norm(&self, index: usize) -> f64 {
        self.norms[index]
    }

    pub(crate) fn identity(&self, index: usize) -> &str {
        &self.identities[index]
    }
}
