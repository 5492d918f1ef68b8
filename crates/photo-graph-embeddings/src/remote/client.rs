//! HTTP client for a JSON image-classifier prediction endpoint.
//!
//! Request body:
//!
//! ```json
//! {"instances": [[[[r, g, b], ...], ...]]}
//! ```
//!
//! one instance laid out `[height][width][channels]`. Response body:
//!
//! ```json
//! {"predictions": [[0.01, 0.93, ...]]}
//! ```
//!
//! The first prediction is the embedding.

use std::time::Duration;

use async_trait::async_trait;
use photo_graph_core::config::EmbeddingConfig;
use photo_graph_core::{CoreError, CoreResult, EmbeddingModel, InputShape, PixelTensor};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::retry::RetryPolicy;
use crate::error::ModelCallError;

/// Longest error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Configuration for [`HttpClassifierModel`].
#[derive(Debug, Clone)]
pub struct RemoteModelConfig {
    pub endpoint: String,
    pub input_shape: InputShape,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl From<&EmbeddingConfig> for RemoteModelConfig {
    fn from(config: &EmbeddingConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            input_shape: config.input_shape(),
            timeout: Duration::from_secs(config.request_timeout_secs),
            retry: RetryPolicy::new(
                config.max_retries,
                Duration::from_millis(config.retry_backoff_ms),
            ),
        }
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: [&'a [Vec<Vec<f32>>]; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<Vec<f32>>,
}

/// Pre-trained classifier served behind an HTTP prediction endpoint.
pub struct HttpClassifierModel {
    config: RemoteModelConfig,
    http: Client,
}

impl HttpClassifierModel {
    /// # Errors
    ///
    /// `CoreError::ConfigError` for an empty endpoint or if the HTTP client
    /// cannot be built.
    pub fn new(config: RemoteModelConfig) -> CoreResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "remote model endpoint must not be empty".into(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &RemoteModelConfig {
        &self.config
    }

    async fn predict_once(&self, body: &[u8]) -> Result<Vec<f32>, ModelCallError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                let mut end = MAX_ERROR_BODY;
                while !text.is_char_boundary(end) {
                    end -= 1;
                }
                text.truncate(end);
            }
            return Err(ModelCallError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: PredictResponse = response.json().await?;
        parsed
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| ModelCallError::Protocol("response carried no predictions".into()))
    }
}

#[async_trait]
impl EmbeddingModel for HttpClassifierModel {
    fn model_id(&self) -> &str {
        &self.config.endpoint
    }

    fn input_shape(&self) -> InputShape {
        self.config.input_shape
    }

    async fn embed(&self, tensor: &PixelTensor) -> CoreResult<Vec<f32>> {
        let nested = tensor.to_nested();
        let request = PredictRequest {
            instances: [nested.as_slice()],
        };
        let body = serde_json::to_vec(&request)?;
        trace!(bytes = body.len(), endpoint = %self.config.endpoint, "Sending prediction request");

        self.config
            .retry
            .run("predict", || async {
                self.predict_once(&body).await.map_err(CoreError::from)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_embedding_config() {
        let cfg = RemoteModelConfig::from(&EmbeddingConfig::default());
        assert_eq!(cfg.input_shape.to_string(), "224x224x3");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.retry.max_retries, 3);
        assert_eq!(cfg.retry.backoff_for(0), Duration::from_millis(200));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let mut cfg = RemoteModelConfig::from(&EmbeddingConfig::default());
        cfg.endpoint = String::new();
        assert!(HttpClassifierModel::new(cfg).is_err());
    }

    #[test]
    fn test_request_layout() {
        let shape = InputShape::new(1, 2, 3);
        let tensor = PixelTensor::new(shape, vec![0.0, 0.5, 1.0, 0.25, 0.75, 0.125]).unwrap();
        let nested = tensor.to_nested();
        let body = serde_json::to_value(PredictRequest {
            instances: [nested.as_slice()],
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"instances": [[[[0.0, 0.5, 1.0], [0.25, 0.75, 0.125]]]]})
        );
    }
}
