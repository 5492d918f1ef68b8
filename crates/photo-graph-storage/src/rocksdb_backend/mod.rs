//! RocksDB storage backend.
//!
//! # Module Structure
//! - `config`: Configuration options (RocksDbConfig)
//! - `error`: Error types (StorageError)
//! - `core`: Main RocksDbGraphStore struct with open/flush/health
//! - `node_ops`: Photo node writes and reads
//! - `edge_ops`: Edge writes, deletes, scans and the adjacency index
//! - `system_ops`: Reset and run summaries
//! - `graph_store_impl`: `GraphStore` trait implementation

mod config;
mod core;
mod edge_ops;
mod error;
mod graph_store_impl;
mod node_ops;
mod system_ops;

#[cfg(test)]
mod tests_edge;
#[cfg(test)]
mod tests_node;
#[cfg(test)]
mod tests_system;

pub use config::{RocksDbConfig, DEFAULT_CACHE_SIZE, DEFAULT_MAX_OPEN_FILES};
pub use core::RocksDbGraphStore;
pub use error::StorageError;
