//! Embedding inputs and models for the photo similarity graph.
//!
//! - [`ImageProcessor`]: decode, convert and resize an image into a
//!   `PixelTensor` scaled to `[0, 1]`
//! - [`DirectoryImageSource`]: recursive file enumeration with identity
//!   derivation and collision detection
//! - [`HttpClassifierModel`]: JSON prediction endpoint client with retry
//! - [`create_model`]: builds the configured `EmbeddingModel`

pub mod directory_source;
pub mod error;
pub mod factory;
pub mod image_processor;
pub mod remote;

pub use directory_source::DirectoryImageSource;
pub use error::ModelCallError;
pub use factory::create_model;
pub use image_processor::ImageProcessor;
pub use remote::{HttpClassifierModel, RemoteModelConfig, RetryPolicy};
