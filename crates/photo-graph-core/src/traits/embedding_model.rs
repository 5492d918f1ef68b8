//! Embedding model abstraction.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{InputShape, PixelTensor};

/// A pre-trained image model used as a black box.
///
/// Implementations return the raw output vector for one input tensor.
/// Shape validation and normalization happen in
/// [`EmbeddingExtractor`](crate::extraction::EmbeddingExtractor), not here.
///
/// # Errors
///
/// Failures reaching the model surface as `CoreError::ExternalCall`, with
/// `transient` set when a retry may succeed.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Identifier recorded in logs and run reports.
    fn model_id(&self) -> &str;

    /// Tensor shape the model accepts.
    fn input_shape(&self) -> InputShape;

    /// Runs the model on one tensor.
    async fn embed(&self, tensor: &PixelTensor) -> CoreResult<Vec<f32>>;
}
