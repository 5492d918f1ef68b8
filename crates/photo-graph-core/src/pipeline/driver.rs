//! Pipeline driver: reset, ingest, compute similarity, apply, prune.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::report::{RunReport, SkippedImage};
use super::state::{RunPhase, RunState};
use crate::config::{Config, FailurePolicy, SimilarityMode};
use crate::error::{CoreError, CoreResult};
use crate::extraction::EmbeddingExtractor;
use crate::mutator::GraphMutator;
use crate::similarity::{NodeSnapshot, SimilarityEngine, SimilarityStats, DEFAULT_CUTOFF};
use crate::traits::{EmbeddingModel, GraphStore, ImageSource, SourceImage};
use crate::types::{EmbeddingVector, PhotoNode};

/// Tunables of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub cutoff: f64,
    pub mode: SimilarityMode,
    pub on_failure: FailurePolicy,
    pub concurrency: usize,
    pub parallel_threshold: usize,
    pub expected_dimension: Option<usize>,
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cutoff: config.similarity.cutoff,
            mode: config.similarity.mode,
            on_failure: config.ingest.on_failure,
            concurrency: config.ingest.concurrency,
            parallel_threshold: config.similarity.parallel_threshold,
            expected_dimension: config.embedding.dimension,
        }
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            mode: SimilarityMode::Pairwise,
            on_failure: FailurePolicy::Skip,
            concurrency: 4,
            parallel_threshold: 256,
            expected_dimension: None,
        }
    }
}

/// Sequences one run against injected collaborators.
pub struct PipelineDriver {
    extractor: Arc<EmbeddingExtractor>,
    store: Arc<dyn GraphStore>,
    source: Arc<dyn ImageSource>,
    engine: SimilarityEngine,
    options: PipelineOptions,
}

/// Counters accumulated while a run progresses.
#[derive(Default)]
struct Progress {
    ingested: usize,
    skipped: Vec<SkippedImage>,
    edges_written: usize,
    edges_pruned: usize,
    mode: SimilarityMode,
}

impl PipelineDriver {
    /// # Errors
    ///
    /// `CoreError::ConfigError` for a cutoff outside `[-1, 1]` or zero
    /// concurrency.
    pub fn new(
        model: Arc<dyn EmbeddingModel>,
        store: Arc<dyn GraphStore>,
        source: Arc<dyn ImageSource>,
        options: PipelineOptions,
    ) -> CoreResult<Self> {
        if options.concurrency == 0 {
            return Err(CoreError::ConfigError(
                "ingest concurrency must be greater than 0".into(),
            ));
        }
        let engine = SimilarityEngine::new(options.cutoff)?
            .with_parallel_threshold(options.parallel_threshold);
        let extractor =
            EmbeddingExtractor::new(model).with_expected_dimension(options.expected_dimension);

        Ok(Self {
            extractor: Arc::new(extractor),
            store,
            source,
            engine,
            options,
        })
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Executes a full run and returns its report.
    ///
    /// On failure the error is returned as is and logged with the phase the
    /// run had reached.
    pub async fn run(&self) -> CoreResult<RunReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline_run", %run_id);
        async {
            let mut state = RunState::new();
            let result = self.run_phases(run_id, &mut state).await;
            if let Err(e) = &result {
                let phase = state
                    .phase()
                    .map(|p| p.as_str())
                    .unwrap_or("START");
                error!(phase, error = %e, "Pipeline run failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_phases(&self, run_id: Uuid, state: &mut RunState) -> CoreResult<RunReport> {
        let started_at = Utc::now();
        let mut progress = Progress::default();

        // Enumerate first so that a collision aborts before anything is wiped.
        let images = self.source.enumerate()?;
        info!(
            images = images.len(),
            model = self.extractor.model_id(),
            cutoff = self.options.cutoff,
            "Starting run"
        );

        self.reset(state)?;
        let ingested = self.ingest(images, state, &mut progress).await?;
        self.verify_node_set(&ingested)?;
        state.advance(RunPhase::NodesComplete)?;

        let nodes = self.store.list_nodes()?;
        let node_count = nodes.len();
        state.advance(RunPhase::ComputingSimilarity)?;
        self.compute_and_apply(nodes, &mut progress).await?;
        state.advance(RunPhase::EdgesApplied)?;

        let mutator = GraphMutator::new(self.store.as_ref(), self.options.cutoff);
        progress.edges_pruned = mutator.prune()?;
        state.advance(RunPhase::Pruned)?;

        let remaining = self.store.list_edges()?;
        let stats = SimilarityStats::from_edges(node_count, &remaining);

        progress.skipped.sort_by(|a, b| a.identity.cmp(&b.identity));
        let report = RunReport {
            run_id,
            model_id: self.extractor.model_id().to_string(),
            cutoff: self.options.cutoff,
            mode: progress.mode,
            started_at,
            finished_at: Utc::now(),
            ingested: progress.ingested,
            skipped: progress.skipped,
            edges_written: progress.edges_written,
            edges_pruned: progress.edges_pruned,
            stats,
            final_phase: RunPhase::Pruned,
        };

        if let Err(e) = self.store.record_run(&report) {
            warn!(error = %e, "Could not record run summary; graph is complete");
        }

        info!(
            ingested = report.ingested,
            skipped = report.skipped.len(),
            edges = report.stats.similarity_pairs,
            pruned = report.edges_pruned,
            duration_ms = report.duration_ms(),
            "Run complete"
        );
        Ok(report)
    }

    fn reset(&self, state: &mut RunState) -> CoreResult<()> {
        self.store.reset()?;
        let health = self.store.health()?;
        if health.node_count != 0 || health.edge_count != 0 {
            return Err(CoreError::StoreState(format!(
                "store still holds {} nodes and {} edges after reset",
                health.node_count, health.edge_count
            )));
        }
        state.advance(RunPhase::Reset)?;
        debug!("Store reset");
        Ok(())
    }

    /// Loads, embeds and stores every image. Returns the stored identities.
    async fn ingest(
        &self,
        images: Vec<SourceImage>,
        state: &mut RunState,
        progress: &mut Progress,
    ) -> CoreResult<HashSet<String>> {
        state.advance(RunPhase::Ingesting)?;
        let mut stored = HashSet::with_capacity(images.len());

        let mut results = stream::iter(images.into_iter().map(|image| {
            let source = Arc::clone(&self.source);
            let extractor = Arc::clone(&self.extractor);
            async move {
                let outcome = load_and_embed(source, &extractor, &image).await;
                (image, outcome)
            }
        }))
        .buffer_unordered(self.options.concurrency);

        while let Some((image, outcome)) = results.next().await {
            match outcome {
                Ok(embedding) => {
                    let node = PhotoNode::new(image.identity.clone(), embedding);
                    self.store.upsert_node(&node)?;
                    state.advance(RunPhase::Ingesting)?;
                    progress.ingested += 1;
                    debug!(identity = %image.identity, dimension = node.dimension(), "Stored node");
                    stored.insert(image.identity);
                }
                Err(e) if e.is_per_image() => match self.options.on_failure {
                    FailurePolicy::Skip => {
                        warn!(
                            identity = %image.identity,
                            path = %image.path.display(),
                            error = %e,
                            "Skipping image"
                        );
                        progress.skipped.push(SkippedImage {
                            identity: image.identity,
                            path: image.path.display().to_string(),
                            reason: e.to_string(),
                        });
                    }
                    FailurePolicy::Abort => {
                        error!(
                            identity = %image.identity,
                            path = %image.path.display(),
                            "Image failed under abort policy"
                        );
                        return Err(e);
                    }
                },
                Err(e) => return Err(e),
            }
        }

        Ok(stored)
    }

    fn verify_node_set(&self, ingested: &HashSet<String>) -> CoreResult<()> {
        let health = self.store.health()?;
        if health.node_count != ingested.len() as u64 {
            return Err(CoreError::StoreState(format!(
                "store holds {} nodes but {} images were ingested",
                health.node_count,
                ingested.len()
            )));
        }
        Ok(())
    }

    async fn compute_and_apply(
        &self,
        nodes: Vec<PhotoNode>,
        progress: &mut Progress,
    ) -> CoreResult<()> {
        // Dimension check happens here, before any edge is written.
        let snapshot = NodeSnapshot::new(nodes)?;
        debug!(
            nodes = snapshot.len(),
            dimension = snapshot.dimension(),
            "Node snapshot taken"
        );

        if self.options.mode == SimilarityMode::StoreBatch {
            match self.store.batch_similarity(self.options.cutoff)? {
                Some(stats) => {
                    info!(
                        pairs = stats.similarity_pairs,
                        mean = stats.mean,
                        "Store batch similarity complete"
                    );
                    progress.edges_written = stats.similarity_pairs;
                    progress.mode = SimilarityMode::StoreBatch;
                    return Ok(());
                }
                None => {
                    info!("Store has no batch similarity; computing pairs in process");
                }
            }
        }

        let engine = self.engine.clone();
        let pairs = tokio::task::spawn_blocking(move || engine.compute_pairs(&snapshot))
            .await
            .map_err(|e| CoreError::Internal(format!("similarity task failed: {}", e)))?;

        let mutator = GraphMutator::new(self.store.as_ref(), self.options.cutoff);
        progress.edges_written = mutator.apply(&pairs)?;
        progress.mode = SimilarityMode::Pairwise;
        Ok(())
    }
}

async fn load_and_embed(
    source: Arc<dyn ImageSource>,
    extractor: &EmbeddingExtractor,
    image: &SourceImage,
) -> CoreResult<EmbeddingVector> {
    let to_load = image.clone();
    let tensor = tokio::task::spawn_blocking(move || source.load(&to_load))
        .await
        .map_err(|e| CoreError::Internal(format!("image loader task failed: {}", e)))??;
    extractor.extract(&tensor).await
}
