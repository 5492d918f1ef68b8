//! Embedding extraction: tensor in, validated embedding out.

use std::sync::Arc;

use tracing::trace;

use crate::error::{CoreError, CoreResult};
use crate::similarity::l2_norm;
use crate::traits::EmbeddingModel;
use crate::types::{EmbeddingVector, InputShape, PixelTensor};

/// Wraps an [`EmbeddingModel`] and enforces the extraction contract.
///
/// - the tensor shape must equal the model input shape
/// - the output must be non-empty and finite
/// - when a dimension is pinned, the output must have exactly that length
/// - the output is scaled to unit length; an all-zero output is kept as is
pub struct EmbeddingExtractor {
    model: Arc<dyn EmbeddingModel>,
    expected_dimension: Option<usize>,
}

impl EmbeddingExtractor {
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            model,
            expected_dimension: None,
        }
    }

    /// Pins the embedding length. Output of any other length is a
    /// `CoreError::DimensionMismatch`.
    pub fn with_expected_dimension(mut self, dimension: Option<usize>) -> Self {
        self.expected_dimension = dimension;
        self
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    pub fn input_shape(&self) -> InputShape {
        self.model.input_shape()
    }

    /// Runs the model on `tensor` and returns the normalized embedding.
    ///
    /// # Errors
    ///
    /// - `CoreError::InputShape` when the tensor does not fit the model
    /// - `CoreError::ExternalCall` when the model call fails
    /// - `CoreError::InvalidEmbedding` for empty or non-finite output
    /// - `CoreError::DimensionMismatch` when output length differs from the
    ///   pinned dimension
    pub async fn extract(&self, tensor: &PixelTensor) -> CoreResult<EmbeddingVector> {
        let expected = self.model.input_shape();
        if tensor.shape() != expected {
            return Err(CoreError::InputShape {
                expected,
                actual: tensor.shape(),
            });
        }

        let raw = self.model.embed(tensor).await?;

        if raw.is_empty() {
            return Err(CoreError::InvalidEmbedding(format!(
                "model '{}' returned an empty vector",
                self.model.model_id()
            )));
        }

        if let Some((index, value)) = raw.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::InvalidEmbedding(format!(
                "model '{}' returned non-finite value {} at index {}",
                self.model.model_id(),
                value,
                index
            )));
        }

        if let Some(dimension) = self.expected_dimension {
            if raw.len() != dimension {
                return Err(CoreError::DimensionMismatch {
                    context: format!("output of model '{}'", self.model.model_id()),
                    expected: dimension,
                    actual: raw.len(),
                });
            }
        }

        let mut embedding: EmbeddingVector = raw.into_iter().map(f64::from).collect();
        let norm = l2_norm(&embedding);
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        trace!(dimension = embedding.len(), norm, "Extracted embedding");
        Ok(embedding)
    }
}
