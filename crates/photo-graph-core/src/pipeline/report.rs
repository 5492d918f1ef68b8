//! Run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RunPhase;
use crate::config::SimilarityMode;
use crate::similarity::SimilarityStats;
use crate::types::Identity;

/// An image left out of the graph under the skip policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedImage {
    pub identity: Identity,
    pub path: String,
    pub reason: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub model_id: String,
    pub cutoff: f64,
    /// Mode that actually produced the edges; `Pairwise` after a fallback.
    pub mode: SimilarityMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ingested: usize,
    pub skipped: Vec<SkippedImage>,
    pub edges_written: usize,
    pub edges_pruned: usize,
    /// Statistics over the edges that survived pruning.
    pub stats: SimilarityStats,
    pub final_phase: RunPhase,
}

impl RunReport {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}
