//! All-pairs cosine similarity over a snapshot of photo nodes.
//!
//! # Semantics
//!
//! - cosine(u, v) = dot(u, v) / (‖u‖ · ‖v‖), clamped to `[-1, 1]`
//! - either norm zero → 0
//! - a pair becomes an edge iff cosine ≥ cutoff
//! - self-pairs are never produced; each unordered pair at most once
//! - every embedding in a snapshot must have the same length, checked before
//!   any pair is computed

mod cosine;
mod engine;
mod snapshot;
mod stats;

pub use cosine::{cosine_similarity, l2_norm};
pub use engine::SimilarityEngine;
pub use snapshot::NodeSnapshot;
pub use stats::SimilarityStats;

/// Default minimum similarity for an edge.
pub const DEFAULT_CUTOFF: f64 = 0.6;
