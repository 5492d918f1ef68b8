//! Stub implementations for development and testing.
//!
//! - [`StubEmbeddingModel`]: deterministic embeddings without a model
//!   service. Selected by `embedding.model = "stub"` for offline runs, so it is
//!   always compiled.
//! - [`InMemoryGraphStore`]: `GraphStore` over in-memory maps, with an
//!   optional batch similarity primitive. Test only.
//! - [`InMemoryImageSource`]: fixed list of tensors or load failures. Test only.
//!
//! Downstream crates enable the test-only stubs through the `test-utils`
//! feature:
//!
//! ```toml
//! [dev-dependencies]
//! photo-graph-core = { workspace = true, features = ["test-utils"] }
//! ```

mod embedding_stub;
#[cfg(any(test, feature = "test-utils"))]
mod image_source_stub;
#[cfg(any(test, feature = "test-utils"))]
mod memory_store;

pub use embedding_stub::StubEmbeddingModel;

#[cfg(any(test, feature = "test-utils"))]
pub use image_source_stub::InMemoryImageSource;

#[cfg(any(test, feature = "test-utils"))]
pub use memory_store::{BatchBehavior, InMemoryGraphStore, StoreFault};
