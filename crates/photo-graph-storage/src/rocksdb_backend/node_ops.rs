//! Photo node operations.
//!
//! A node spans two column families: its record in `photos` and its vector
//! in `embeddings`. Both are written in one batch.

use photo_graph_core::PhotoNode;
use rocksdb::{IteratorMode, WriteBatch};
use tracing::trace;

use crate::column_families::cf_names;
use crate::serialization::{
    deserialize_embedding, deserialize_node_record, serialize_embedding, serialize_node_record,
    PhotoRecord,
};

use super::core::RocksDbGraphStore;
use super::error::StorageError;

impl RocksDbGraphStore {
    /// Creates or replaces a node. The caller validates it first.
    pub fn put_node(&self, node: &PhotoNode) -> Result<(), StorageError> {
        let photos_cf = self.get_cf(cf_names::PHOTOS)?;
        let embeddings_cf = self.get_cf(cf_names::EMBEDDINGS)?;

        let key = node.identity.as_bytes();
        let record = serialize_node_record(&PhotoRecord::from_node(node))?;
        let embedding = serialize_embedding(&node.embedding);

        let mut batch = WriteBatch::default();
        batch.put_cf(photos_cf, key, record);
        batch.put_cf(embeddings_cf, key, embedding);

        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        trace!(identity = %node.identity, dimension = node.dimension(), "Node written");
        Ok(())
    }

    /// # Errors
    ///
    /// - `StorageError::NotFound` if no node has this identity
    /// - `StorageError::IndexCorrupted` if the embedding is missing or its
    ///   length disagrees with the record
    pub fn get_node(&self, identity: &str) -> Result<PhotoNode, StorageError> {
        let photos_cf = self.get_cf(cf_names::PHOTOS)?;
        let embeddings_cf = self.get_cf(cf_names::EMBEDDINGS)?;

        let record = self
            .db
            .get_cf(photos_cf, identity.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
            .ok_or_else(|| StorageError::NotFound {
                id: identity.to_string(),
            })?;
        let record = deserialize_node_record(&record)?;

        let embedding = self
            .db
            .get_cf(embeddings_cf, identity.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        assemble(record, embedding)
    }

    pub fn node_exists(&self, identity: &str) -> Result<bool, StorageError> {
        let photos_cf = self.get_cf(cf_names::PHOTOS)?;
        let found = self
            .db
            .get_pinned_cf(photos_cf, identity.as_bytes())
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(found.is_some())
    }

    /// Every node, ordered by identity.
    pub fn scan_nodes(&self) -> Result<Vec<PhotoNode>, StorageError> {
        let photos_cf = self.get_cf(cf_names::PHOTOS)?;
        let embeddings_cf = self.get_cf(cf_names::EMBEDDINGS)?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(photos_cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            records.push(deserialize_node_record(&value)?);
        }

        let embeddings = self
            .db
            .multi_get_cf(records.iter().map(|r| (embeddings_cf, r.identity.as_bytes())));

        records
            .into_iter()
            .zip(embeddings)
            .map(|(record, embedding)| {
                let embedding = embedding.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
                assemble(record, embedding)
            })
            .collect()
    }
}

fn assemble(record: PhotoRecord, embedding: Option<Vec<u8>>) -> Result<PhotoNode, StorageError> {
    let bytes = embedding.ok_or_else(|| StorageError::IndexCorrupted {
        index_name: cf_names::EMBEDDINGS.to_string(),
        details: format!("photo '{}' has no embedding", record.identity),
    })?;
    let embedding = deserialize_embedding(&bytes)?;

    if embedding.len() != record.dimension as usize {
        return Err(StorageError::IndexCorrupted {
            index_name: cf_names::EMBEDDINGS.to_string(),
            details: format!(
                "photo '{}' records dimension {} but its embedding has {}",
                record.identity,
                record.dimension,
                embedding.len()
            ),
        });
    }
    Ok(record.into_node(embedding))
}
