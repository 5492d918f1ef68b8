//! Configuration management for the photo graph pipeline.

mod sub_configs;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub use sub_configs::{
    EmbeddingConfig, FailurePolicy, IdentityMode, IngestConfig, LoggingConfig, SimilarityConfig,
    SimilarityMode, SourceConfig, StorageConfig,
};

/// Environment variable selecting the environment-specific config file.
pub const ENV_SELECTOR: &str = "PHOTO_GRAPH_ENV";

/// Prefix of configuration override variables, e.g. `PHOTO_GRAPH__SIMILARITY__CUTOFF`.
pub const ENV_PREFIX: &str = "PHOTO_GRAPH";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub source: SourceConfig,
    pub ingest: IngestConfig,
    pub similarity: SimilarityConfig,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{PHOTO_GRAPH_ENV}.toml (environment-specific)
    /// 3. Environment variables with the `PHOTO_GRAPH__` prefix
    pub fn load() -> CoreResult<Self> {
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults for tests and offline runs.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| CoreError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> CoreResult<()> {
        let cutoff = self.similarity.cutoff;
        if !cutoff.is_finite() || !(-1.0..=1.0).contains(&cutoff) {
            return Err(CoreError::ConfigError(format!(
                "similarity.cutoff must be within [-1, 1], got {}",
                cutoff
            )));
        }

        if self.embedding.input_height == 0 || self.embedding.input_width == 0 {
            return Err(CoreError::ConfigError(
                "embedding.input_height and embedding.input_width must be greater than 0".into(),
            ));
        }

        if self.embedding.dimension == Some(0) {
            return Err(CoreError::ConfigError(
                "embedding.dimension must be greater than 0 when set".into(),
            ));
        }

        match self.embedding.model.as_str() {
            "remote" => {
                if self.embedding.endpoint.trim().is_empty() {
                    return Err(CoreError::ConfigError(
                        "embedding.endpoint is required when embedding.model = \"remote\"".into(),
                    ));
                }
            }
            "stub" => {}
            other => {
                return Err(CoreError::ConfigError(format!(
                    "embedding.model must be \"remote\" or \"stub\", got \"{}\"",
                    other
                )));
            }
        }

        if self.ingest.concurrency == 0 {
            return Err(CoreError::ConfigError(
                "ingest.concurrency must be greater than 0".into(),
            ));
        }

        if self.storage.dataset.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "storage.dataset must not be empty".into(),
            ));
        }

        if self.source.extensions.is_empty() {
            return Err(CoreError::ConfigError(
                "source.extensions must list at least one extension".into(),
            ));
        }

        Ok(())
    }

    /// Whether the configured model is the deterministic stub.
    pub fn uses_stubs(&self) -> bool {
        self.embedding.model == "stub"
    }

    /// Directory holding the configured dataset.
    pub fn dataset_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.path).join(&self.storage.dataset)
    }
}
