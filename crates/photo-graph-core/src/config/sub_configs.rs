//! Sub-configuration structures.
//!
//! Each section of the `Config` TOML document maps to one struct here. Every
//! struct implements `Default`, so a section may be omitted entirely.

use serde::{Deserialize, Serialize};

use crate::types::InputShape;

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when neither `-v` nor `RUST_LOG` is given.
    pub level: String,
    /// "pretty" or "compact".
    pub format: String,
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            include_location: false,
        }
    }
}

/// Graph store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Root directory; each dataset gets its own subdirectory.
    pub path: String,
    /// Dataset (database) name the run operates on.
    pub dataset: String,
    /// Shared block cache size in bytes.
    pub block_cache_size: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: "./data/photo-graph".to_string(),
            dataset: "photosearch".to_string(),
            block_cache_size: 64 * 1024 * 1024,
        }
    }
}

/// Embedding model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// "remote" for the HTTP classifier endpoint, "stub" for deterministic
    /// offline embeddings.
    pub model: String,
    /// Prediction endpoint of the remote model.
    pub endpoint: String,
    /// Model input height in pixels.
    pub input_height: u32,
    /// Model input width in pixels.
    pub input_width: u32,
    /// Expected embedding length. `None` accepts whatever the first image yields.
    pub dimension: Option<usize>,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    /// Base backoff; attempt `n` waits `retry_backoff_ms * 2^n`.
    pub retry_backoff_ms: u64,
}

impl EmbeddingConfig {
    /// Model input shape. Channels are always RGB.
    pub fn input_shape(&self) -> InputShape {
        InputShape::new(self.input_height, self.input_width, 3)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "remote".to_string(),
            endpoint: "http://localhost:8501/v1/models/mobilenet_v2:predict".to_string(),
            input_height: 224,
            input_width: 224,
            dimension: None,
            request_timeout_secs: 30,
            max_retries: 3,
            retry_backoff_ms: 200,
        }
    }
}

/// How a node identity is derived from a source path.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// Base file name; two files with the same name in different
    /// directories collide.
    #[default]
    FileName,
    /// Path relative to the source root, `/`-separated.
    RelativePath,
}

/// Image source configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory scanned recursively for images.
    pub root: String,
    /// Lower-case file extensions accepted, without the dot.
    pub extensions: Vec<String>,
    pub identity: IdentityMode,
    /// Convert every decoded image to 3-channel RGB before resizing.
    pub convert_to_rgb: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: "./photos".to_string(),
            extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
            identity: IdentityMode::default(),
            convert_to_rgb: true,
        }
    }
}

/// What to do when one image fails to load or embed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log, record the image as skipped and continue.
    #[default]
    Skip,
    /// Abort the run with the image's error.
    Abort,
}

/// Ingestion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    pub on_failure: FailurePolicy,
    /// Images loaded and embedded concurrently.
    pub concurrency: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            on_failure: FailurePolicy::default(),
            concurrency: 4,
        }
    }
}

/// Where pairwise similarities are computed.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMode {
    /// In-process all-pairs computation.
    #[default]
    Pairwise,
    /// Store-provided batch primitive, falling back to pairwise when the
    /// store has none.
    StoreBatch,
}

/// Similarity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Minimum cosine similarity for an edge, in `[-1, 1]`.
    pub cutoff: f64,
    pub mode: SimilarityMode,
    /// Node count at which the pairwise pass switches to rayon.
    pub parallel_threshold: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            cutoff: crate::similarity::DEFAULT_CUTOFF,
            mode: SimilarityMode::default(),
            parallel_threshold: 256,
        }
    }
}
