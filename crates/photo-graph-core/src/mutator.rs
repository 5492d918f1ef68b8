//! Graph mutations: apply computed edges, prune degenerate ones.

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::traits::GraphStore;
use crate::types::{EdgePredicate, SimilarityEdge};

/// Writes similarity edges to a store and removes degenerate edges.
pub struct GraphMutator<'a> {
    store: &'a dyn GraphStore,
    cutoff: f64,
}

impl<'a> GraphMutator<'a> {
    pub fn new(store: &'a dyn GraphStore, cutoff: f64) -> Self {
        Self { store, cutoff }
    }

    /// Creates or replaces one edge per pair.
    ///
    /// The store writes the whole set at once, so a failure leaves no
    /// partial edge set behind.
    pub fn apply(&self, edges: &[SimilarityEdge]) -> CoreResult<usize> {
        if let Some(edge) = edges.iter().find(|e| !e.weight.is_finite()) {
            return Err(CoreError::Internal(format!(
                "edge {}-{} has non-finite weight",
                edge.source, edge.target
            )));
        }
        if edges.is_empty() {
            debug!("No similarity edges to apply");
            return Ok(0);
        }
        let written = self.store.upsert_edges(edges)?;
        info!(edges = written, "Applied similarity edges");
        Ok(written)
    }

    /// Deletes self-loops and edges with weight below the cutoff.
    ///
    /// Idempotent: a second call removes nothing.
    pub fn prune(&self) -> CoreResult<usize> {
        let removed = self
            .store
            .delete_edges_where(&EdgePredicate::degenerate(self.cutoff))?;
        info!(removed, cutoff = self.cutoff, "Pruned degenerate edges");
        Ok(removed)
    }
}
