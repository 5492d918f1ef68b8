//! RocksDB column family definitions.
//!
//! # Column Families
//! | Name | Purpose | Key Format | Optimization |
//! |------|---------|------------|--------------|
//! | photos | Node records | identity | Bloom filter, point lookups |
//! | embeddings | Embedding vectors | identity | Large blocks |
//! | similarity_edges | One record per unordered pair | source\0target | Bloom filter |
//! | adjacency | Both directions of every edge | identity\0neighbour | Ordered scans |
//! | system | Run summaries | string key | No compression |
//!
//! All column families except `system` share one LRU block cache.

use rocksdb::{BlockBasedOptions, Cache, ColumnFamilyDescriptor, Options};

/// Column family name constants.
pub mod cf_names {
    /// Photo node records.
    pub const PHOTOS: &str = "photos";

    /// Embedding vectors keyed like `photos`.
    pub const EMBEDDINGS: &str = "embeddings";

    /// Canonical `IS_SIMILAR_TO` edges.
    pub const SIMILARITY_EDGES: &str = "similarity_edges";

    /// Neighbour index: each edge appears once per endpoint.
    pub const ADJACENCY: &str = "adjacency";

    /// Store metadata (last run summary).
    pub const SYSTEM: &str = "system";

    /// Column families holding graph data, cleared by reset.
    pub const GRAPH: &[&str] = &[PHOTOS, EMBEDDINGS, SIMILARITY_EDGES, ADJACENCY];

    pub const ALL: &[&str] = &[PHOTOS, EMBEDDINGS, SIMILARITY_EDGES, ADJACENCY, SYSTEM];
}

/// Options for point-lookup column families (photos, similarity_edges).
///
/// - Bloom filter: 10 bits per key
/// - Shared block cache, index and filter blocks cached
/// - LZ4 compression
pub fn point_lookup_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_bloom_filter(10.0, false);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);

    opts
}

/// Options for embedding vectors: 64KB blocks for large sequential reads.
pub fn embeddings_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(64 * 1024);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);

    opts
}

/// Options for the adjacency index, read by ordered range scans.
///
/// Identities have variable length, so no fixed prefix extractor; scans seek
/// to `identity\0` and stop at the first key without that prefix.
pub fn adjacency_options(cache: &Cache) -> Options {
    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_cache_index_and_filter_blocks(true);

    let mut opts = Options::default();
    opts.set_block_based_table_factory(&block_opts);
    opts.set_compression_type(rocksdb::DBCompressionType::Lz4);
    opts.create_if_missing(true);

    opts
}

/// Options for the rarely written system column family.
pub fn system_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::None);
    opts.create_if_missing(true);

    opts
}

pub fn get_column_family_descriptors(block_cache: &Cache) -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(cf_names::PHOTOS, point_lookup_options(block_cache)),
        ColumnFamilyDescriptor::new(cf_names::EMBEDDINGS, embeddings_options(block_cache)),
        ColumnFamilyDescriptor::new(
            cf_names::SIMILARITY_EDGES,
            point_lookup_options(block_cache),
        ),
        ColumnFamilyDescriptor::new(cf_names::ADJACENCY, adjacency_options(block_cache)),
        ColumnFamilyDescriptor::new(cf_names::SYSTEM, system_options()),
    ]
}
