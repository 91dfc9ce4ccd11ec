//! Column family descriptor generation for RocksDB.
//!
//! Creates descriptors tuned to each column family's access pattern: point
//! lookups for the node and edge tables, prefix range scans for the two
//! directional adjacency indexes.

use rocksdb::{
    BlockBasedOptions, Cache, ColumnFamilyDescriptor, DBCompressionType, Options, SliceTransform,
};

use super::config::StorageConfig;
use super::constants::*;
use crate::error::EngineResult;

/// Get column family descriptors for all storage CFs.
///
/// Order matches `ALL_COLUMN_FAMILIES`.
///
/// # Errors
///
/// Returns `EngineError::InvalidConfig` if configuration validation fails.
pub fn get_column_family_descriptors(
    config: &StorageConfig,
) -> EngineResult<Vec<ColumnFamilyDescriptor>> {
    // Validate config first - fail fast
    config.validate()?;

    // Shared LRU cache for memory efficiency
    let cache = Cache::new_lru_cache(config.block_cache_size);

    Ok(vec![
        nodes_cf_descriptor(config, &cache),
        directional_cf_descriptor(CF_FWD_EDGES, config, &cache),
        directional_cf_descriptor(CF_BWD_EDGES, config, &cache),
        edges_cf_descriptor(config, &cache),
        metadata_cf_descriptor(&cache),
    ])
}

/// CF descriptor for the node existence index.
/// Optimized for point lookups on 8-byte keys with empty values.
fn nodes_cf_descriptor(config: &StorageConfig, cache: &Cache) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_max_write_buffer_number(config.max_write_buffers);

    if config.enable_compression {
        opts.set_compression_type(DBCompressionType::Lz4);
    }

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(4 * 1024); // Small blocks for point lookups

    // Strong bloom filter: most membership tests during a search miss
    block_opts.set_bloom_filter(config.bloom_filter_bits as f64, false);
    block_opts.set_whole_key_filtering(true);

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(CF_NODES, opts)
}

/// CF descriptor for a directional adjacency index (fwd_edges/bwd_edges).
/// Optimized for range scans within a 16-byte (type, anchor) prefix.
fn directional_cf_descriptor(
    name: &str,
    config: &StorageConfig,
    cache: &Cache,
) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_max_write_buffer_number(config.max_write_buffers);

    if config.enable_compression {
        opts.set_compression_type(DBCompressionType::Lz4);
    }

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(16 * 1024); // 16KB blocks for scans

    // Prefix bloom filter over the (type/anchor, anchor/type) half of the key
    block_opts.set_bloom_filter(config.bloom_filter_bits as f64, false);
    block_opts.set_whole_key_filtering(false);

    opts.set_block_based_table_factory(&block_opts);

    // First 16 bytes fix the probe: (edge_type, from) or (to, edge_type)
    opts.set_prefix_extractor(SliceTransform::create_fixed_prefix(16));

    ColumnFamilyDescriptor::new(name, opts)
}

/// CF descriptor for edge records.
/// Optimized for point lookups by edge id.
fn edges_cf_descriptor(config: &StorageConfig, cache: &Cache) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    opts.set_write_buffer_size(config.write_buffer_size);
    opts.set_max_write_buffer_number(config.max_write_buffers);

    if config.enable_compression {
        opts.set_compression_type(DBCompressionType::Lz4);
    }

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(8 * 1024); // 8KB blocks

    block_opts.set_bloom_filter(config.bloom_filter_bits as f64, false);

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(CF_EDGES, opts)
}

/// CF descriptor for metadata.
/// Small CF for schema version and the edge-id counter.
fn metadata_cf_descriptor(cache: &Cache) -> ColumnFamilyDescriptor {
    let mut opts = Options::default();

    // Minimal write buffer for small metadata
    opts.set_write_buffer_size(4 * 1024 * 1024); // 4MB
    opts.set_max_write_buffer_number(2);

    let mut block_opts = BlockBasedOptions::default();
    block_opts.set_block_cache(cache);
    block_opts.set_block_size(4 * 1024);

    opts.set_block_based_table_factory(&block_opts);

    ColumnFamilyDescriptor::new(CF_METADATA, opts)
}

/// Default DB options for opening the database.
///
/// Parallelism scales with the CPU count; background jobs are capped at a
/// reasonable level.
#[must_use]
pub fn get_db_options() -> Options {
    let mut opts = Options::default();

    opts.create_if_missing(true);
    opts.create_missing_column_families(true);
    opts.set_max_open_files(1000);
    opts.set_keep_log_file_num(10);

    let cpu_count = num_cpus::get() as i32;
    opts.increase_parallelism(cpu_count.max(2));
    opts.set_max_background_jobs(cpu_count.clamp(2, 8));

    opts
}
