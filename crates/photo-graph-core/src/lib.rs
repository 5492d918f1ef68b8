//! Photo Graph Core Library
//!
//! Builds an image-similarity graph: every input image becomes a `Photo` node
//! carrying a model embedding, and every pair whose cosine similarity reaches
//! the cutoff is joined by an undirected `IS_SIMILAR_TO` edge.
//!
//! # Architecture
//!
//! This crate defines:
//! - Domain types (`PhotoNode`, `SimilarityEdge`, `PixelTensor`, `InputShape`)
//! - Collaborator traits (`EmbeddingModel`, `GraphStore`, `ImageSource`)
//! - The similarity engine, graph mutator and pipeline driver
//! - Error types, configuration and stubs
//!
//! # Example
//!
//! ```
//! use photo_graph_core::similarity::SimilarityEngine;
//! use photo_graph_core::types::PhotoNode;
//!
//! let engine = SimilarityEngine::new(0.6).unwrap();
//! let edges = engine
//!     .compute(vec![
//!         PhotoNode::new("img1", vec![1.0, 0.0]),
//!         PhotoNode::new("img2", vec![1.0, 0.0]),
//!         PhotoNode::new("img3", vec![0.0, 1.0]),
//!     ])
//!     .unwrap();
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].pair(), ("img1", "img2"));
//! ```

pub mod config;
pub mod error;
pub mod extraction;
pub mod mutator;
pub mod pipeline;
pub mod similarity;
pub mod stubs;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use extraction::EmbeddingExtractor;
pub use mutator::GraphMutator;
pub use pipeline::{PipelineDriver, PipelineOptions, RunPhase, RunReport, RunState};
pub use similarity::{SimilarityEngine, SimilarityStats};
pub use traits::{EmbeddingModel, GraphHealth, GraphStore, ImageSource, SourceImage};
pub use types::{EdgePredicate, InputShape, PhotoNode, PixelTensor, SimilarityEdge};
