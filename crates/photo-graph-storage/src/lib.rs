//! Photo Graph Storage Layer
//!
//! Persistent [`GraphStore`](photo_graph_core::GraphStore) on RocksDB. One
//! database directory holds one dataset.
//!
//! # Column Families
//!
//! | Name | Key | Value |
//! |------|-----|-------|
//! | photos | identity | bincode `PhotoRecord` |
//! | embeddings | identity | little-endian f64 array |
//! | similarity_edges | source `\0` target | bincode `EdgeRecord` |
//! | adjacency | identity `\0` neighbour | little-endian f64 weight |
//! | system | string key | JSON |
//!
//! # Example
//!
//! ```rust
//! use photo_graph_core::{GraphStore, PhotoNode, SimilarityEdge};
//! use photo_graph_storage::RocksDbGraphStore;
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! let store = RocksDbGraphStore::open(tmp.path()).unwrap();
//! store.upsert_node(&PhotoNode::new("img1", vec![1.0, 0.0])).unwrap();
//! store.upsert_node(&PhotoNode::new("img2", vec![1.0, 0.0])).unwrap();
//! store.upsert_edges(&[SimilarityEdge::new("img1", "img2", 1.0)]).unwrap();
//! assert_eq!(store.neighbors("img2").unwrap()[0].0, "img1");
//! ```

pub mod column_families;
pub mod rocksdb_backend;
pub mod serialization;

pub use column_families::cf_names;
pub use rocksdb_backend::{
    RocksDbConfig, RocksDbGraphStore, StorageError, DEFAULT_CACHE_SIZE, DEFAULT_MAX_OPEN_FILES,
};
pub use serialization::SerializationError;
