//! Cache backend trait and statistics.
//!
//! This module defines the trait that must be implemented by cache backends.

use async_trait::async_trait;
use customer_core::{CustomerResult, Timestamp};

/// A cached value together with the moment it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub bytes: Vec<u8>,
    pub cached_at: Timestamp,
}

/// Cache backend trait for pluggable cache implementations.
///
/// Backends store opaque serialized bytes under string keys. Expiry is
/// decided by the caller from `cached_at`, so a backend never needs to know
/// the TTL. Implementations must be safe for concurrent access.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Get a value from the cache, or `None` if the key is absent.
    async fn get(&self, key: &str) -> CustomerResult<Option<CacheEntry>>;

    /// Put a value into the cache, replacing any previous entry.
    async fn put(&self, key: &str, entry: CacheEntry) -> CustomerResult<()>;

    /// Delete a single key. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> CustomerResult<()>;

    /// Delete every key starting with `prefix`, returning how many were removed.
    async fn delete_prefix(&self, prefix: &str) -> CustomerResult<u64>;

    /// Number of entries currently stored.
    async fn entry_count(&self) -> CustomerResult<u64>;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of entries dropped because their TTL elapsed.
    pub expirations: u64,
    /// Number of entries removed by write invalidation.
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            ..Default::default()
        };
        assert!((stats.hit_rate() - 0.8).abs() < 0.001);

        let empty_stats = CacheStats::default();
        assert!((empty_stats.hit_rate() - 0.0).abs() < 0.001);
    }
}
