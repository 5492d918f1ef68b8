//! Deterministic embedding model.
//!
//! Two modes:
//!
//! - **Hashed**: hash the tensor contents, seed an LCG with the hash and draw
//!   `dimension` values in `[-1, 1]`. Identical tensors give identical vectors.
//! - **Echo**: return the tensor data itself. Lets tests dictate embeddings
//!   exactly by crafting tiny tensors.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::traits::EmbeddingModel;
use crate::types::{InputShape, PixelTensor};

#[derive(Debug, Clone, Copy)]
enum Mode {
    Hashed { dimension: usize },
    Echo,
}

/// Embedding model that needs no service.
#[derive(Debug, Clone)]
pub struct StubEmbeddingModel {
    input_shape: InputShape,
    mode: Mode,
    model_id: String,
}

impl StubEmbeddingModel {
    /// Hashed mode producing `dimension`-length vectors.
    pub fn new(input_shape: InputShape, dimension: usize) -> Self {
        Self {
            input_shape,
            mode: Mode::Hashed { dimension },
            model_id: format!("stub-hashed-{}", dimension),
        }
    }

    /// Echo mode: the embedding is the tensor data.
    pub fn echo(input_shape: InputShape) -> Self {
        Self {
            input_shape,
            mode: Mode::Echo,
            model_id: "stub-echo".to_string(),
        }
    }

    fn hashed(&self, tensor: &PixelTensor, dimension: usize) -> Vec<f32> {
        let mut hasher = DefaultHasher::new();
        for value in tensor.data() {
            value.to_bits().hash(&mut hasher);
        }
        let mut seed = hasher.finish();

        let mut vector = Vec::with_capacity(dimension);
        for _ in 0..dimension {
            // Knuth MMIX LCG
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = (seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            vector.push(value as f32);
        }
        vector
    }
}

#[async_trait]
impl EmbeddingModel for StubEmbeddingModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn input_shape(&self) -> InputShape {
        self.input_shape
    }

    async fn embed(&self, tensor: &PixelTensor) -> CoreResult<Vec<f32>> {
        Ok(match self.mode {
            Mode::Hashed { dimension } => self.hashed(tensor, dimension),
            Mode::Echo => tensor.data().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hashed_dimension_and_determinism() {
        let shape = InputShape::new(2, 2, 3);
        let model = StubEmbeddingModel::new(shape, 16);
        let t = PixelTensor::new(shape, vec![0.5; 12]).unwrap();
        let a = model.embed(&t).await.unwrap();
        let b = model.embed(&t).await.unwrap();
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);
        assert_eq!(model.model_id(), "stub-hashed-16");
    }

    #[tokio::test]
    async fn test_hashed_different_inputs_differ() {
        let shape = InputShape::new(2, 2, 3);
        let model = StubEmbeddingModel::new(shape, 16);
        let a = model
            .embed(&PixelTensor::new(shape, vec![0.5; 12]).unwrap())
            .await
            .unwrap();
        let b = model
            .embed(&PixelTensor::new(shape, vec![0.25; 12]).unwrap())
            .await
            .unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_echo() {
        let shape = InputShape::new(1, 3, 1);
        let model = StubEmbeddingModel::echo(shape);
        let t = PixelTensor::new(shape, vec![1.0, 0.0, 2.0]).unwrap();
        assert_eq!(model.embed(&t).await.unwrap(), vec![1.0, 0.0, 2.0]);
    }
}
