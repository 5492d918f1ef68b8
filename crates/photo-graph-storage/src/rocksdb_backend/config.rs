//! RocksDB configuration.

use photo_graph_core::config::StorageConfig;

/// Default block cache size: 256MB.
pub const DEFAULT_CACHE_SIZE: usize = 256 * 1024 * 1024;

/// Default maximum open files.
pub const DEFAULT_MAX_OPEN_FILES: i32 = 1000;

/// Options applied when opening a [`RocksDbGraphStore`](super::RocksDbGraphStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RocksDbConfig {
    /// Shared LRU block cache size in bytes.
    pub block_cache_size: usize,
    pub max_open_files: i32,
    /// Write-ahead log. Disabling trades durability for write speed.
    pub enable_wal: bool,
    pub create_if_missing: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            block_cache_size: DEFAULT_CACHE_SIZE,
            max_open_files: DEFAULT_MAX_OPEN_FILES,
            enable_wal: true,
            create_if_missing: true,
        }
    }
}

impl From<&StorageConfig> for RocksDbConfig {
    fn from(storage: &StorageConfig) -> Self {
        Self {
            block_cache_size: storage.block_cache_size,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RocksDbConfig::default();
        assert_eq!(config.block_cache_size, 256 * 1024 * 1024);
        assert_eq!(config.max_open_files, 1000);
        assert!(config.enable_wal);
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_from_storage_config() {
        let storage = StorageConfig {
            block_cache_size: 8 * 1024 * 1024,
            ..StorageConfig::default()
        };
        let config = RocksDbConfig::from(&storage);
        assert_eq!(config.block_cache_size, 8 * 1024 * 1024);
        assert_eq!(config.max_open_files, DEFAULT_MAX_OPEN_FILES);
    }
}
