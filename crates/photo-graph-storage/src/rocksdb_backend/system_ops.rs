//! Reset and run-summary operations.

use photo_graph_core::RunReport;
use rocksdb::{IteratorMode, WriteBatch};
use tracing::info;

use crate::column_families::cf_names;

use super::core::RocksDbGraphStore;
use super::error::StorageError;

/// System key holding the JSON summary of the last completed run.
pub(crate) const LAST_RUN_KEY: &[u8] = b"last_run";

impl RocksDbGraphStore {
    /// Deletes every key of the graph column families in one batch.
    ///
    /// The system column family survives, so the previous run summary stays
    /// readable while a new run is in progress.
    pub fn clear_graph(&self) -> Result<u64, StorageError> {
        let mut batch = WriteBatch::default();
        let mut deleted = 0u64;

        for cf_name in cf_names::GRAPH {
            let cf = self.get_cf(cf_name)?;
            for item in self.db.iterator_cf(cf, IteratorMode::Start) {
                let (key, _) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
                batch.delete_cf(cf, key);
                deleted += 1;
            }
        }

        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        info!(path = %self.path(), keys = deleted, "Graph cleared");
        Ok(deleted)
    }

    pub fn put_last_run(&self, report: &RunReport) -> Result<(), StorageError> {
        let cf = self.get_cf(cf_names::SYSTEM)?;
        let value =
            serde_json::to_vec(report).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.db
            .put_cf(cf, LAST_RUN_KEY, value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// Summary of the last completed run, if any.
    pub fn last_run(&self) -> Result<Option<RunReport>, StorageError> {
        let cf = self.get_cf(cf_names::SYSTEM)?;
        let Some(bytes) = self
            .db
            .get_cf(cf, LAST_RUN_KEY)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}
