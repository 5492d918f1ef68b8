//! Pairwise similarity engine.

use rayon::prelude::*;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{PhotoNode, SimilarityEdge};

use super::cosine::{cosine_from_parts, dot};
use super::snapshot::NodeSnapshot;
use super::DEFAULT_CUTOFF;

/// Computes every unordered pair whose cosine similarity reaches the cutoff.
///
/// Rows of the upper triangle are independent, so snapshots at or above
/// `parallel_threshold` nodes are split across the rayon pool. Output order is
/// the same either way: ascending `(source, target)`.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    cutoff: f64,
    parallel_threshold: usize,
}

impl SimilarityEngine {
    /// Creates an engine with the given cutoff.
    ///
    /// # Errors
    ///
    /// `CoreError::ConfigError` if `cutoff` is not a finite value in `[-1, 1]`.
    pub fn new(cutoff: f64) -> CoreResult<Self> {
        if !cutoff.is_finite() || !(-1.0..=1.0).contains(&cutoff) {
            return Err(CoreError::ConfigError(format!(
                "similarity cutoff must be within [-1, 1], got {}",
                cutoff
            )));
        }
        Ok(Self {
            cutoff,
            parallel_threshold: 256,
        })
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    #[inline]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// All qualifying pairs of `snapshot`.
    ///
    /// The snapshot already guarantees a uniform dimension, so this cannot
    /// fail on mismatched vectors.
    pub fn compute_pairs(&self, snapshot: &NodeSnapshot) -> Vec<SimilarityEdge> {
        let n = snapshot.len();
        let parallel = n >= self.parallel_threshold;

        let mut edges: Vec<SimilarityEdge> = if parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| self.row(snapshot, i))
                .collect()
        } else {
            (0..n).flat_map(|i| self.row(snapshot, i)).collect()
        };

        edges.sort_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.target.cmp(&b.target))
        });

        debug!(
            nodes = n,
            pairs = edges.len(),
            cutoff = self.cutoff,
            parallel,
            "Similarity pass complete"
        );
        edges
    }

    /// Validates `nodes` into a snapshot and computes its pairs.
    ///
    /// # Errors
    ///
    /// `CoreError::DimensionMismatch` before any pair is produced if embedding
    /// lengths differ.
    pub fn compute(&self, nodes: Vec<PhotoNode>) -> CoreResult<Vec<SimilarityEdge>> {
        let snapshot = NodeSnapshot::new(nodes)?;
        Ok(self.compute_pairs(&snapshot))
    }

    fn row<'a>(
        &'a self,
        snapshot: &'a NodeSnapshot,
        i: usize,
    ) -> impl Iterator<Item = SimilarityEdge> + 'a {
        let a = snapshot.embedding(i);
        let norm_a = snapshot.norm(i);
        (i + 1..snapshot.len()).filter_map(move |j| {
            let sim = cosine_from_parts(dot(a, snapshot.embedding(j)), norm_a, snapshot.norm(j));
            (sim >= self.cutoff).then(|| {
                SimilarityEdge::new(snapshot.identity(i), snapshot.identity(j), sim)
            })
        })
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            parallel_threshold: 256,
        }
    }
}
