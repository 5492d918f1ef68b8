//! `build`: reset the dataset and rebuild its similarity graph.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use photo_graph_core::config::{FailurePolicy, SimilarityMode};
use photo_graph_core::{Config, CoreError, PipelineDriver, PipelineOptions};
use photo_graph_embeddings::{create_model, DirectoryImageSource};
use tracing::info;

use super::{fail, open_store, print_json};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Pairwise,
    StoreBatch,
}

impl From<ModeArg> for SimilarityMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pairwise => SimilarityMode::Pairwise,
            ModeArg::StoreBatch => SimilarityMode::StoreBatch,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FailureArg {
    Skip,
    Abort,
}

impl From<FailureArg> for FailurePolicy {
    fn from(policy: FailureArg) -> Self {
        match policy {
            FailureArg::Skip => FailurePolicy::Skip,
            FailureArg::Abort => FailurePolicy::Abort,
        }
    }
}

/// Arguments for the build command. Each overrides its configuration key.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Image directory (source.root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Minimum similarity for an edge (similarity.cutoff)
    #[arg(long, allow_hyphen_values = true)]
    pub cutoff: Option<f64>,

    /// Where pairs are computed (similarity.mode)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// What to do when one image fails (ingest.on_failure)
    #[arg(long, value_enum)]
    pub on_failure: Option<FailureArg>,
}

impl BuildArgs {
    /// Applies the overrides and revalidates.
    pub fn apply(&self, mut config: Config) -> Result<Config, CoreError> {
        if let Some(root) = &self.root {
            config.source.root = root.display().to_string();
        }
        if let Some(cutoff) = self.cutoff {
            config.similarity.cutoff = cutoff;
        }
        if let Some(mode) = self.mode {
            config.similarity.mode = mode.into();
        }
        if let Some(policy) = self.on_failure {
            config.ingest.on_failure = policy.into();
        }
        config.validate()?;
        Ok(config)
    }
}

pub async fn handle_build(args: BuildArgs, config: Config) -> i32 {
    let config = match args.apply(config) {
        Ok(config) => config,
        Err(e) => return fail("Invalid build arguments", &e),
    };

    let model = match create_model(&config.embedding) {
        Ok(model) => model,
        Err(e) => return fail("Cannot create embedding model", &e),
    };
    let store = match open_store(&config) {
        Ok(store) => Arc::new(store),
        Err(code) => return code,
    };
    let source = Arc::new(DirectoryImageSource::from_config(&config));

    info!(
        root = %config.source.root,
        dataset = %config.storage.dataset,
        model = model.model_id(),
        "Building similarity graph"
    );

    let driver = match PipelineDriver::new(
        model,
        store,
        source,
        PipelineOptions::from_config(&config),
    ) {
        Ok(driver) => driver,
        Err(e) => return fail("Cannot start pipeline", &e),
    };

    match driver.run().await {
        Ok(report) => print_json(&report),
        Err(e) => fail("Build failed", &e),
    }
}
