//! Graph store abstraction.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::pipeline::RunReport;
use crate::similarity::SimilarityStats;
use crate::types::{EdgePredicate, Identity, PhotoNode, SimilarityEdge};

/// Node and edge counts reported by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphHealth {
    pub is_healthy: bool,
    pub node_count: u64,
    pub edge_count: u64,
}

/// Persistent store for photo nodes and `IS_SIMILAR_TO` edges within one
/// dataset.
///
/// Object-safe and `Send + Sync` so the driver can hold an
/// `Arc<dyn GraphStore>`. Calls are synchronous; stores backed by a remote
/// service map transport failures to `CoreError::ExternalCall`.
pub trait GraphStore: Send + Sync {
    /// Removes every node and edge in the dataset.
    fn reset(&self) -> CoreResult<()>;

    /// Creates or replaces the node with `node.identity`.
    fn upsert_node(&self, node: &PhotoNode) -> CoreResult<()>;

    /// Every node currently stored.
    fn list_nodes(&self) -> CoreResult<Vec<PhotoNode>>;

    /// Creates or replaces one edge per unordered pair, as a single write.
    ///
    /// Returns the number of edges written.
    fn upsert_edges(&self, edges: &[SimilarityEdge]) -> CoreResult<usize>;

    /// Deletes every edge matching `predicate`, returning how many were removed.
    fn delete_edges_where(&self, predicate: &EdgePredicate) -> CoreResult<usize>;

    /// Every edge currently stored.
    fn list_edges(&self) -> CoreResult<Vec<SimilarityEdge>>;

    /// Neighbours of `identity` with edge weights, highest weight first.
    fn neighbors(&self, identity: &str) -> CoreResult<Vec<(Identity, f64)>>;

    /// Current node and edge counts.
    fn health(&self) -> CoreResult<GraphHealth>;

    /// Store-side all-pairs similarity, if the store has one.
    ///
    /// Writes edges for pairs at or above `cutoff` and returns summary
    /// statistics. `Ok(None)` means the store has no such primitive and the
    /// caller must compute pairs itself. Implementations may write self-loops
    /// or sub-cutoff edges; the caller prunes afterwards.
    fn batch_similarity(&self, _cutoff: f64) -> CoreResult<Option<SimilarityStats>> {
        Ok(None)
    }

    /// Persists the summary of a finished run. Stores without a place for
    /// metadata may ignore it.
    fn record_run(&self, _report: &RunReport) -> CoreResult<()> {
        Ok(())
    }
}
