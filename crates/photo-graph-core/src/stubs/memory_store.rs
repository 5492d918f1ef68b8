//! In-memory graph store.

use std::collections::BTreeMap;

use parking_lot::{Mutex, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::pipeline::RunReport;
use crate::similarity::{cosine_similarity, NodeSnapshot, SimilarityEngine, SimilarityStats};
use crate::traits::{GraphHealth, GraphStore};
use crate::types::{EdgePredicate, Identity, PhotoNode, SimilarityEdge};

/// How [`GraphStore::batch_similarity`] behaves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BatchBehavior {
    /// Returns `Ok(None)`.
    #[default]
    Unsupported,
    /// Writes exactly the pairs at or above the cutoff.
    Exact,
    /// Also writes a self-loop per node and pairs down to `cutoff - slack`,
    /// as a store with a coarse native primitive might.
    Lenient { slack: f64 },
}

/// Injected failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    /// `reset` reports success but leaves data behind.
    StaleReset,
    /// `upsert_node` fails.
    UpsertNode,
    /// `upsert_edges` fails without writing.
    UpsertEdges,
}

/// `GraphStore` over ordered maps.
///
/// O(n) neighbour lookup and no persistence.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    nodes: RwLock<BTreeMap<Identity, PhotoNode>>,
    edges: RwLock<BTreeMap<(Identity, Identity), SimilarityEdge>>,
    batch: BatchBehavior,
    fault: Mutex<Option<StoreFault>>,
    runs: RwLock<Vec<RunReport>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch(batch: BatchBehavior) -> Self {
        Self {
            batch,
            ..Self::default()
        }
    }

    pub fn inject_fault(&self, fault: Option<StoreFault>) {
        *self.fault.lock() = fault;
    }

    /// Run summaries passed to `record_run`, oldest first.
    pub fn recorded_runs(&self) -> Vec<RunReport> {
        self.runs.read().clone()
    }

    fn faulted(&self, fault: StoreFault) -> bool {
        *self.fault.lock() == Some(fault)
    }

    fn write_edges(&self, edges: Vec<SimilarityEdge>) -> usize {
        let mut map = self.edges.write();
        let count = edges.len();
        for edge in edges {
            map.insert((edge.source.clone(), edge.target.clone()), edge);
        }
        count
    }
}

impl GraphStore for InMemoryGraphStore {
    fn reset(&self) -> CoreResult<()> {
        if self.faulted(StoreFault::StaleReset) {
            return Ok(());
        }
        self.edges.write().clear();
        self.nodes.write().clear();
        Ok(())
    }

    fn upsert_node(&self, node: &PhotoNode) -> CoreResult<()> {
        if self.faulted(StoreFault::UpsertNode) {
            return Err(CoreError::store("injected upsert_node failure"));
        }
        node.validate()?;
        self.nodes
            .write()
            .insert(node.identity.clone(), node.clone());
        Ok(())
    }

    fn list_nodes(&self) -> CoreResult<Vec<PhotoNode>> {
        Ok(self.nodes.read().values().cloned().collect())
    }

    fn upsert_edges(&self, edges: &[SimilarityEdge]) -> CoreResult<usize> {
        if self.faulted(StoreFault::UpsertEdges) {
            return Err(CoreError::store("injected upsert_edges failure"));
        }
        {
            let nodes = self.nodes.read();
            for edge in edges {
                for endpoint in [&edge.source, &edge.target] {
                    if !nodes.contains_key(endpoint) {
                        return Err(CoreError::StoreState(format!(
                            "edge endpoint '{}' is not a stored node",
                            endpoint
                        )));
                    }
                }
            }
        }
        let canonical = edges
            .iter()
            .map(|e| SimilarityEdge::new(e.source.clone(), e.target.clone(), e.weight))
            .collect();
        Ok(self.write_edges(canonical))
    }

    fn delete_edges_where(&self, predicate: &EdgePredicate) -> CoreResult<usize> {
        let mut map = self.edges.write();
        let before = map.len();
        map.retain(|_, edge| !predicate.matches(edge));
        Ok(before - map.len())
    }

    fn list_edges(&self) -> CoreResult<Vec<SimilarityEdge>> {
        Ok(self.edges.read().values().cloned().collect())
    }

    fn neighbors(&self, identity: &str) -> CoreResult<Vec<(Identity, f64)>> {
        let mut out: Vec<(Identity, f64)> = self
            .edges
            .read()
            .values()
            .filter_map(|e| {
                e.other_endpoint(identity)
                    .map(|other| (other.to_string(), e.weight))
            })
            .collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(out)
    }

    fn health(&self) -> CoreResult<GraphHealth> {
        Ok(GraphHealth {
            is_healthy: true,
            node_count: self.nodes.read().len() as u64,
            edge_count: self.edges.read().len() as u64,
        })
    }

    fn batch_similarity(&self, cutoff: f64) -> CoreResult<Option<SimilarityStats>> {
        let nodes = self.list_nodes()?;
        let node_count = nodes.len();

        let edges = match self.batch {
            BatchBehavior::Unsupported => return Ok(None),
            BatchBehavior::Exact => SimilarityEngine::new(cutoff)?.compute(nodes)?,
            BatchBehavior::Lenient { slack } => {
                // dimension check only
                NodeSnapshot::new(nodes.clone())?;
                let floor = cutoff - slack;
                let mut edges = Vec::new();
                for (i, a) in nodes.iter().enumerate() {
                    edges.push(SimilarityEdge::new(a.identity.clone(), a.identity.clone(), 1.0));
                    for b in &nodes[i + 1..] {
                        let sim = cosine_similarity(&a.embedding, &b.embedding)?;
                        if sim >= floor {
                            edges.push(SimilarityEdge::new(
                                a.identity.clone(),
                                b.identity.clone(),
                                sim,
                            ));
                        }
                    }
                }
                edges
            }
        };

        let stats = SimilarityStats::from_edges(node_count, &edges);
        self.write_edges(edges);
        Ok(Some(stats))
    }

    fn record_run(&self, report: &RunReport) -> CoreResult<()> {
        self.runs.write().push(report.clone());
        Ok(())
    }
}
