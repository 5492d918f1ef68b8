//! Builds the configured embedding model.

use std::sync::Arc;

use photo_graph_core::config::EmbeddingConfig;
use photo_graph_core::stubs::StubEmbeddingModel;
use photo_graph_core::{CoreError, CoreResult, EmbeddingModel};
use tracing::{info, warn};

use crate::remote::{HttpClassifierModel, RemoteModelConfig};

/// Output length of the stub model when no dimension is pinned.
const STUB_DEFAULT_DIMENSION: usize = 1001;

/// Creates the model named by `embedding.model`.
///
/// - `"remote"`: [`HttpClassifierModel`] against `embedding.endpoint`
/// - `"stub"`: deterministic hashed embeddings, no service needed
pub fn create_model(config: &EmbeddingConfig) -> CoreResult<Arc<dyn EmbeddingModel>> {
    match config.model.as_str() {
        "remote" => {
            let model = HttpClassifierModel::new(RemoteModelConfig::from(config))?;
            info!(endpoint = %config.endpoint, shape = %config.input_shape(), "Using remote model");
            Ok(Arc::new(model))
        }
        "stub" => {
            let dimension = config.dimension.unwrap_or(STUB_DEFAULT_DIMENSION);
            warn!(
                dimension,
                "Using stub embedding model; similarities carry no visual meaning"
            );
            Ok(Arc::new(StubEmbeddingModel::new(config.input_shape(), dimension)))
        }
        other => Err(CoreError::ConfigError(format!(
            "unknown embedding model \"{}\"",
            other
        ))),
    }
}
