//! Similarity edge operations.
//!
//! Each edge is stored once under its canonical key in `similarity_edges`
//! and once per endpoint in `adjacency`. Both are maintained in the same
//! batch, so the index never drifts from the edge set.

use std::collections::BTreeSet;

use photo_graph_core::types::Identity;
use photo_graph_core::{EdgePredicate, SimilarityEdge};
use rocksdb::{Direction, IteratorMode, WriteBatch};
use tracing::debug;

use crate::column_families::cf_names;
use crate::serialization::{
    adjacency_key, adjacency_prefix, deserialize_edge, deserialize_weight, edge_key,
    serialize_edge, serialize_weight, split_pair_key, EdgeRecord,
};

use super::core::RocksDbGraphStore;
use super::error::StorageError;

impl RocksDbGraphStore {
    /// Writes all edges in one batch after checking every endpoint exists.
    ///
    /// Edges are canonicalised, so `(b, a)` replaces an existing `(a, b)`.
    pub fn put_edges(&self, edges: &[SimilarityEdge]) -> Result<usize, StorageError> {
        let endpoints: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        for endpoint in endpoints {
            if !self.node_exists(endpoint)? {
                return Err(StorageError::MissingEndpoint {
                    identity: endpoint.to_string(),
                });
            }
        }

        let edges_cf = self.get_cf(cf_names::SIMILARITY_EDGES)?;
        let adjacency_cf = self.get_cf(cf_names::ADJACENCY)?;

        let mut batch = WriteBatch::default();
        for edge in edges {
            let edge = SimilarityEdge::new(edge.source.clone(), edge.target.clone(), edge.weight);
            let value = serialize_edge(&EdgeRecord {
                weight: edge.weight,
            })?;
            let weight = serialize_weight(edge.weight);

            batch.put_cf(edges_cf, edge_key(&edge.source, &edge.target), value);
            batch.put_cf(adjacency_cf, adjacency_key(&edge.source, &edge.target), weight);
            if !edge.is_self_loop() {
                batch.put_cf(adjacency_cf, adjacency_key(&edge.target, &edge.source), weight);
            }
        }

        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        debug!(edges = edges.len(), "Edges written");
        Ok(edges.len())
    }

    /// Every edge, ordered by `(source, target)`.
    pub fn scan_edges(&self) -> Result<Vec<SimilarityEdge>, StorageError> {
        let edges_cf = self.get_cf(cf_names::SIMILARITY_EDGES)?;
        let mut edges = Vec::new();
        for item in self.db.iterator_cf(edges_cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            let (source, target) = split_pair_key(&key)?;
            let record = deserialize_edge(&value)?;
            edges.push(SimilarityEdge {
                source,
                target,
                weight: record.weight,
            });
        }
        Ok(edges)
    }

    /// Deletes matching edges and their adjacency entries in one batch.
    pub fn remove_edges_where(&self, predicate: &EdgePredicate) -> Result<usize, StorageError> {
        let edges_cf = self.get_cf(cf_names::SIMILARITY_EDGES)?;
        let adjacency_cf = self.get_cf(cf_names::ADJACENCY)?;

        let mut batch = WriteBatch::default();
        let mut removed = 0usize;
        for edge in self.scan_edges()? {
            if !predicate.matches(&edge) {
                continue;
            }
            batch.delete_cf(edges_cf, edge_key(&edge.source, &edge.target));
            batch.delete_cf(adjacency_cf, adjacency_key(&edge.source, &edge.target));
            batch.delete_cf(adjacency_cf, adjacency_key(&edge.target, &edge.source));
            removed += 1;
        }

        if removed > 0 {
            self.db
                .write(batch)
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        debug!(removed, "Edges deleted");
        Ok(removed)
    }

    /// Neighbours of `identity` from the adjacency index, highest weight
    /// first, ties by identity.
    pub fn scan_neighbors(&self, identity: &str) -> Result<Vec<(Identity, f64)>, StorageError> {
        let adjacency_cf = self.get_cf(cf_names::ADJACENCY)?;
        let prefix = adjacency_prefix(identity);

        let mut neighbors = Vec::new();
        let iter = self
            .db
            .iterator_cf(adjacency_cf, IteratorMode::From(prefix.as_slice(), Direction::Forward));
        for item in iter {
            let (key, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            let (_, neighbor) = split_pair_key(&key)?;
            neighbors.push((neighbor, deserialize_weight(&value)?));
        }

        neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(neighbors)
    }
}
