//! Binary encodings for stored records and keys.
//!
//! | Type | Format |
//! |------|--------|
//! | `PhotoRecord` | bincode |
//! | `EdgeRecord` | bincode |
//! | Embedding | Raw LE f64 |
//! | Adjacency weight | Raw LE f64 |
//! | Keys | UTF-8 identities joined by a NUL byte |
//!
//! Identities never contain NUL (see `validate_identity`), so splitting a
//! compound key at its first NUL is unambiguous.

mod edge;
mod embedding;
mod error;
mod keys;
mod node;

pub use edge::{deserialize_edge, serialize_edge, EdgeRecord};
pub use embedding::{deserialize_embedding, deserialize_weight, serialize_embedding, serialize_weight};
pub use error::SerializationError;
pub use keys::{adjacency_key, adjacency_prefix, edge_key, split_pair_key};
pub use node::{deserialize_node_record, serialize_node_record, PhotoRecord};
