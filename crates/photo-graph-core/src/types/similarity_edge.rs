//! Undirected similarity edge between two photo nodes.

use serde::{Deserialize, Serialize};

use super::Identity;

/// An `IS_SIMILAR_TO` edge.
///
/// Edges are undirected: [`SimilarityEdge::new`] orders the endpoints so that
/// `source <= target`, giving one canonical form per unordered pair. A self-loop
/// is representable so that degenerate edges written by a store-side primitive
/// can be inspected and pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityEdge {
    /// Lexicographically smaller endpoint.
    pub source: Identity,
    /// Lexicographically larger endpoint.
    pub target: Identity,
    /// Cosine similarity of the endpoint embeddings.
    pub weight: f64,
}

impl SimilarityEdge {
    /// Creates an edge in canonical endpoint order.
    pub fn new(a: impl Into<Identity>, b: impl Into<Identity>, weight: f64) -> Self {
        let a = a.into();
        let b = b.into();
        if a <= b {
            Self {
                source: a,
                target: b,
                weight,
            }
        } else {
            Self {
                source: b,
                target: a,
                weight,
            }
        }
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Whether `identity` is one of the endpoints.
    pub fn touches(&self, identity: &str) -> bool {
        self.source == identity || self.target == identity
    }

    /// The endpoint opposite `identity`, if `identity` is an endpoint.
    pub fn other_endpoint(&self, identity: &str) -> Option<&str> {
        if self.source == identity {
            Some(&self.target)
        } else if self.target == identity {
            Some(&self.source)
        } else {
            None
        }
    }

    /// Canonical unordered-pair key.
    pub fn pair(&self) -> (&str, &str) {
        (&self.source, &self.target)
    }
}

/// Predicate over stored edges, evaluated by the store.
///
/// Declarative so that stores can translate it into their own delete query.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgePredicate {
    /// Edge connects a node to itself.
    SelfLoop,
    /// Weight strictly below the threshold.
    WeightBelow(f64),
    /// Matches if any inner predicate matches.
    Any(Vec<EdgePredicate>),
}

impl EdgePredicate {
    /// Self-loops or edges under the similarity cutoff.
    pub fn degenerate(cutoff: f64) -> Self {
        Self::Any(vec![Self::SelfLoop, Self::WeightBelow(cutoff)])
    }

    pub fn matches(&self, edge: &SimilarityEdge) -> bool {
        match self {
            Self::SelfLoop => edge.is_self_loop(),
            Self::WeightBelow(threshold) => edge.weight < *threshold,
            Self::Any(inner) => inner.iter().any(|p| p.matches(edge)),
        }
    }
}
