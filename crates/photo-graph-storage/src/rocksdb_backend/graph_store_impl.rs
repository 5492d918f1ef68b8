//! `GraphStore` implementation for [`RocksDbGraphStore`].

use photo_graph_core::types::Identity;
use photo_graph_core::{
    CoreResult, EdgePredicate, GraphHealth, GraphStore, PhotoNode, RunReport, SimilarityEdge,
    SimilarityEngine, SimilarityStats,
};
use tracing::info;

use crate::column_families::cf_names;

use super::core::RocksDbGraphStore;

impl GraphStore for RocksDbGraphStore {
    fn reset(&self) -> CoreResult<()> {
        self.clear_graph()?;
        Ok(())
    }

    fn upsert_node(&self, node: &PhotoNode) -> CoreResult<()> {
        node.validate()?;
        Ok(self.put_node(node)?)
    }

    fn list_nodes(&self) -> CoreResult<Vec<PhotoNode>> {
        Ok(self.scan_nodes()?)
    }

    fn upsert_edges(&self, edges: &[SimilarityEdge]) -> CoreResult<usize> {
        Ok(self.put_edges(edges)?)
    }

    fn delete_edges_where(&self, predicate: &EdgePredicate) -> CoreResult<usize> {
        Ok(self.remove_edges_where(predicate)?)
    }

    fn list_edges(&self) -> CoreResult<Vec<SimilarityEdge>> {
        Ok(self.scan_edges()?)
    }

    fn neighbors(&self, identity: &str) -> CoreResult<Vec<(Identity, f64)>> {
        Ok(self.scan_neighbors(identity)?)
    }

    fn health(&self) -> CoreResult<GraphHealth> {
        self.health_check()?;
        Ok(GraphHealth {
            is_healthy: true,
            node_count: self.count_keys(cf_names::PHOTOS)?,
            edge_count: self.count_keys(cf_names::SIMILARITY_EDGES)?,
        })
    }

    /// Computes all pairs next to the data and writes them in one batch.
    fn batch_similarity(&self, cutoff: f64) -> CoreResult<Option<SimilarityStats>> {
        let nodes = self.scan_nodes()?;
        let node_count = nodes.len();
        let edges = SimilarityEngine::new(cutoff)?.compute(nodes)?;
        self.put_edges(&edges)?;

        let stats = SimilarityStats::from_edges(node_count, &edges);
        info!(
            nodes = node_count,
            pairs = stats.similarity_pairs,
            "Batch similarity written"
        );
        Ok(Some(stats))
    }

    fn record_run(&self, report: &RunReport) -> CoreResult<()> {
        Ok(self.put_last_run(report)?)
    }
}
