//! Error types for photo-graph-core.
//!
//! This module defines the central error type [`CoreError`] used by every
//! crate in the workspace, along with the [`CoreResult<T>`] type alias.
//!
//! Errors fall into two classes:
//!
//! - **Per-image** errors ([`CoreError::is_per_image`]) describe one bad input
//!   file. The pipeline driver applies the configured failure policy to them.
//! - **Run-fatal** errors abort the run. Store failures, dimension mismatches
//!   across the dataset and configuration problems are all run-fatal.
//!
//! # Examples
//!
//! ```rust
//! use photo_graph_core::CoreError;
//!
//! let error = CoreError::DimensionMismatch {
//!     context: "node 'img2.jpg'".to_string(),
//!     expected: 4,
//!     actual: 5,
//! };
//! assert!(!error.is_per_image());
//! assert!(error.to_string().contains("img2.jpg"));
//! ```

use thiserror::Error;

use crate::pipeline::RunPhase;
use crate::types::InputShape;

/// Top-level error type for photo-graph operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A decoded image does not match the shape the model expects.
    ///
    /// # When This Occurs
    ///
    /// - The image source is configured to keep native channels and a file
    ///   is grayscale or carries an alpha channel
    /// - A tensor was built for a different model input size
    #[error("Input shape mismatch: expected {expected}, got {actual}")]
    InputShape {
        /// Shape the model accepts
        expected: InputShape,
        /// Shape of the tensor that was offered
        actual: InputShape,
    },

    /// Embedding vectors of different lengths met in one computation.
    ///
    /// Raised before any similarity edge is written.
    #[error("Dimension mismatch ({context}): expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which vector or node broke the invariant
        context: String,
        /// Dimension established by the dataset
        expected: usize,
        /// Dimension of the offending vector
        actual: usize,
    },

    /// The model service or graph store failed or could not be reached.
    #[error("External call to {service} failed: {message}")]
    ExternalCall {
        /// Logical name of the remote collaborator ("embedding-model", "graph-store")
        service: String,
        /// Failure description
        message: String,
        /// Whether retrying the same call may succeed
        transient: bool,
    },

    /// The store is not in the state the current phase requires.
    #[error("Store state error: {0}")]
    StoreState(String),

    /// An image file could not be read or decoded.
    #[error("Failed to decode image {path}: {message}")]
    ImageDecode {
        /// Path of the image
        path: String,
        /// Decoder or I/O message
        message: String,
    },

    /// The model returned an embedding that cannot be used.
    #[error("Invalid embedding: {0}")]
    InvalidEmbedding(String),

    /// Two source files derive the same node identity.
    #[error("Identity collision for '{identity}': {first} and {second}")]
    IdentityCollision {
        /// The shared identity
        identity: String,
        /// First path that produced it
        first: String,
        /// Second path that produced it
        second: String,
    },

    /// The image source root could not be enumerated.
    #[error("Image source error at {path}: {message}")]
    Source {
        /// Root or directory that failed
        path: String,
        /// I/O message
        message: String,
    },

    /// A run attempted an illegal phase transition.
    #[error("Invalid run transition: {from} -> {to}")]
    InvalidTransition {
        /// Phase the run was in, `None` before reset
        from: String,
        /// Requested phase
        to: RunPhase,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Internal error that should not happen.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Creates an [`CoreError::ExternalCall`] for the graph store.
    pub fn store(message: impl Into<String>) -> Self {
        Self::ExternalCall {
            service: "graph-store".to_string(),
            message: message.into(),
            transient: false,
        }
    }

    /// Creates an [`CoreError::ExternalCall`] for the embedding model.
    pub fn model(message: impl Into<String>, transient: bool) -> Self {
        Self::ExternalCall {
            service: "embedding-model".to_string(),
            message: message.into(),
            transient,
        }
    }

    /// Whether this error concerns a single input image.
    ///
    /// Only meaningful for errors raised while loading or embedding an image;
    /// the same variants coming out of the store are still run-fatal.
    pub fn is_per_image(&self) -> bool {
        matches!(
            self,
            Self::InputShape { .. }
                | Self::ImageDecode { .. }
                | Self::InvalidEmbedding(_)
                | Self::ExternalCall { .. }
        )
    }

    /// Whether retrying the failed call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ExternalCall { transient: true, .. })
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::SerializationError(err.to_string())
    }
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
