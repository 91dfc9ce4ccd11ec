//! Storage configuration for the RocksDB backend.
//!
//! All parameters are validated before use via `validate()`. Invalid
//! configurations fail fast with `EngineError::InvalidConfig`.

use crate::error::{EngineError, EngineResult};

/// Configuration for graph storage.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Block cache size in bytes (default: 256MB).
    /// Shared across all column families.
    pub block_cache_size: usize,

    /// Enable compression (default: true, uses LZ4).
    pub enable_compression: bool,

    /// Bloom filter bits per key (default: 10).
    /// Higher values improve read performance at cost of memory.
    pub bloom_filter_bits: i32,

    /// Write buffer size in bytes (default: 64MB).
    pub write_buffer_size: usize,

    /// Max write buffers (default: 3).
    pub max_write_buffers: i32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            block_cache_size: 256 * 1024 * 1024, // 256MB
            enable_compression: true,
            bloom_filter_bits: 10,
            write_buffer_size: 64 * 1024 * 1024, // 64MB
            max_write_buffers: 3,
        }
    }
}

impl StorageConfig {
    /// Config optimized for read-heavy workloads (query serving).
    ///
    /// - Larger block cache (1GB)
    /// - Higher bloom filter bits (14)
    #[must_use]
    pub fn read_optimized() -> Self {
        Self {
            block_cache_size: 1024 * 1024 * 1024, // 1GB
            bloom_filter_bits: 14,
            ..Default::default()
        }
    }

    /// Config optimized for write-heavy workloads (bulk loading).
    ///
    /// - Larger write buffers (128MB)
    /// - More write buffers (5)
    #[must_use]
    pub fn write_optimized() -> Self {
        Self {
            write_buffer_size: 128 * 1024 * 1024, // 128MB
            max_write_buffers: 5,
            ..Default::default()
        }
    }

    /// Validate configuration, returning EngineError if invalid.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if:
    /// - `block_cache_size` < 1MB
    /// - `bloom_filter_bits` not in 1..=20
    /// - `write_buffer_size` < 1MB
    /// - `max_write_buffers` < 1
    pub fn validate(&self) -> EngineResult<()> {
        const MIN_SIZE: usize = 1024 * 1024; // 1MB

        if self.block_cache_size < MIN_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "block_cache_size must be >= 1MB, got {} bytes",
                self.block_cache_size
            )));
        }

        if self.bloom_filter_bits < 1 || self.bloom_filter_bits > 20 {
            return Err(EngineError::InvalidConfig(format!(
                "bloom_filter_bits must be 1..=20, got {}",
                self.bloom_filter_bits
            )));
        }

        if self.write_buffer_size < MIN_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "write_buffer_size must be >= 1MB, got {} bytes",
                self.write_buffer_size
            )));
        }

        if self.max_write_buffers < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "max_write_buffers must be >= 1, got {}",
                self.max_write_buffers
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(StorageConfig::read_optimized().validate().is_ok());
        assert!(StorageConfig::write_optimized().validate().is_ok());
    }

    #[test]
    fn test_tiny_block_cache_rejected() {
        let config = StorageConfig {
            block_cache_size: 1024,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bloom_bits_bounds() {
        let config = StorageConfig {
            bloom_filter_bits: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StorageConfig {
            bloom_filter_bits: 21,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
