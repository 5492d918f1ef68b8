//! Core RocksDbGraphStore struct and database lifecycle.
//!
//! ```text
//! RocksDbGraphStore
//! ├── DB (RocksDB instance)
//! │   ├── CF: photos            - Node records
//! │   ├── CF: embeddings        - Embedding vectors
//! │   ├── CF: similarity_edges  - Canonical edges
//! │   ├── CF: adjacency         - Neighbour index
//! │   └── CF: system            - Run summaries
//! └── Cache (LRU block cache, 256MB default)
//! ```

use std::fs;
use std::path::Path;

use photo_graph_core::config::StorageConfig;
use rocksdb::{Cache, ColumnFamily, IteratorMode, Options, DB};
use tracing::info;

use crate::column_families::{cf_names, get_column_family_descriptors};

use super::config::RocksDbConfig;
use super::error::StorageError;

/// RocksDB-backed graph store for one dataset.
///
/// `DB` is internally synchronised, so every method takes `&self` and the
/// store can be shared as `Arc<RocksDbGraphStore>`. Multi-key writes go
/// through a single `WriteBatch` and are atomic.
pub struct RocksDbGraphStore {
    pub(crate) db: DB,

    /// Kept alive for the database lifetime.
    #[allow(dead_code)]
    cache: Cache,

    path: String,
}

impl RocksDbGraphStore {
    /// Opens or creates a database at `path` with default configuration.
    ///
    /// # Errors
    ///
    /// `StorageError::OpenFailed` if the path is unusable or locked by
    /// another process.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::open_with_config(path, RocksDbConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: RocksDbConfig,
    ) -> Result<Self, StorageError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let cache = Cache::new_lru_cache(config.block_cache_size);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(config.create_if_missing);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_open_files(config.max_open_files);

        if !config.enable_wal {
            db_opts.set_manual_wal_flush(true);
        }

        let cf_descriptors = get_column_family_descriptors(&cache);

        let db = DB::open_cf_descriptors(&db_opts, &path_str, cf_descriptors).map_err(|e| {
            StorageError::OpenFailed {
                path: path_str.clone(),
                message: e.to_string(),
            }
        })?;

        info!(path = %path_str, "Opened graph store");
        Ok(Self {
            db,
            cache,
            path: path_str,
        })
    }

    /// Opens the dataset named in `storage`, below its root directory.
    pub fn open_dataset(storage: &StorageConfig) -> Result<Self, StorageError> {
        let path = Path::new(&storage.path).join(&storage.dataset);
        fs::create_dir_all(&path).map_err(|e| StorageError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::open_with_config(&path, RocksDbConfig::from(storage))
    }

    pub fn get_cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound {
                name: name.to_string(),
            })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Verifies every column family is accessible. Does not scan data.
    pub fn health_check(&self) -> Result<(), StorageError> {
        for cf_name in cf_names::ALL {
            self.get_cf(cf_name)?;
        }
        Ok(())
    }

    /// Flushes memtables of every column family to disk.
    pub fn flush_all(&self) -> Result<(), StorageError> {
        for cf_name in cf_names::ALL {
            let cf = self.get_cf(cf_name)?;
            self.db
                .flush_cf(cf)
                .map_err(|e| StorageError::FlushFailed(e.to_string()))?;
        }
        Ok(())
    }

    /// Exact key count of one column family.
    pub(crate) fn count_keys(&self, cf_name: &str) -> Result<u64, StorageError> {
        let cf = self.get_cf(cf_name)?;
        let mut count = 0u64;
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }
}

impl std::fmt::Debug for RocksDbGraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RocksDbGraphStore")
            .field("path", &self.path)
            .finish()
    }
}
