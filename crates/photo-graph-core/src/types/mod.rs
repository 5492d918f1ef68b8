//! Core domain types for the photo similarity graph.

mod photo_node;
mod pixel_tensor;
mod similarity_edge;

pub use photo_node::*;
pub use pixel_tensor::*;
pub use similarity_edge::*;

/// Node identity derived from the source file (file name or relative path).
pub type Identity = String;

/// Embedding vector as stored on a node.
pub type EmbeddingVector = Vec<f64>;

/// Label carried by every node in the graph.
pub const PHOTO_LABEL: &str = "Photo";

/// Relationship type of every similarity edge.
pub const IS_SIMILAR_TO: &str = "IS_SIMILAR_TO";
