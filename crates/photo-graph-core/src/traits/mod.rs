//! Core trait definitions for the photo graph pipeline.
//!
//! The pipeline driver depends only on these traits, so the embedding model,
//! graph store and image source are injected and can be swapped for stubs.
//!
//! # Traits
//!
//! - [`EmbeddingModel`]: maps a pixel tensor to an embedding vector
//! - [`GraphStore`]: persists photo nodes and similarity edges
//! - [`ImageSource`]: enumerates and decodes input images

mod embedding_model;
mod graph_store;
mod image_source;

pub use embedding_model::EmbeddingModel;
pub use graph_store::{GraphHealth, GraphStore};
pub use image_source::{ImageSource, SourceImage};
