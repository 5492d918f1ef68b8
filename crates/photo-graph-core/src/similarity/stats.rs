//! Summary statistics over a set of similarity edges.

use serde::{Deserialize, Serialize};

use crate::types::SimilarityEdge;

/// Distribution of edge weights produced by one similarity pass.
///
/// `std_dev` is the population standard deviation. All weight fields are 0
/// when there are no edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityStats {
    pub nodes: usize,
    pub similarity_pairs: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SimilarityStats {
    pub fn from_edges(nodes: usize, edges: &[SimilarityEdge]) -> Self {
        if edges.is_empty() {
            return Self {
                nodes,
                ..Self::default()
            };
        }

        let n = edges.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for e in edges {
            min = min.min(e.weight);
            max = max.max(e.weight);
            sum += e.weight;
        }
        let mean = sum / n;
        let variance = edges
            .iter()
            .map(|e| (e.weight - mean).powi(2))
            .sum::<f64>()
            / n;

        Self {
            nodes,
            similarity_pairs: edges.len(),
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
