//! Read-through cache with absolute expiry.
//!
//! A lookup checks the backend first; a missing or expired entry falls
//! through to the supplied fetch, and a present result is written back as
//! serialized JSON. Absent results are never cached.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use customer_core::{CacheError, CustomerResult};
use serde::{de::DeserializeOwned, Serialize};

use super::keys::{CacheKey, LIST_KEY_PREFIX};
use super::read::CacheRead;
use super::traits::{CacheBackend, CacheEntry, CacheStats};

/// Configuration for the read-through cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Absolute lifetime of an entry, measured from when it was written.
    pub entry_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entry_ttl: Duration::from_secs(600), // 10 minutes
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entry TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = ttl;
        self
    }
}

#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: AtomicU64,
    invalidations: AtomicU64,
}

/// Read-through cache over a pluggable backend.
///
/// # Example
///
/// ```ignore
/// let cache = ReadThroughCache::new(Arc::new(InMemoryCacheBackend::new()), CacheConfig::default());
/// let read = cache
///     .get_or_fetch(&CacheKey::for_customer(id), || repo.get_by_id(id))
///     .await?;
/// ```
pub struct ReadThroughCache<C>
where
    C: CacheBackend,
{
    /// The cache backend.
    cache: Arc<C>,
    /// Cache configuration.
    config: CacheConfig,
    counters: Arc<CacheCounters>,
}

impl<C> ReadThroughCache<C>
where
    C: CacheBackend,
{
    /// Create a new read-through cache.
    pub fn new(cache: Arc<C>, config: CacheConfig) -> Self {
        Self {
            cache,
            config,
            counters: Arc::new(CacheCounters::default()),
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a reference to the cache backend.
    pub fn backend(&self) -> &C {
        &self.cache
    }

    /// Return the cached value for `key`, or run `fetch` and cache its result.
    ///
    /// Returns `Ok(None)` when the entry is not cached and `fetch` finds
    /// nothing; that absence is not remembered.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &CacheKey,
        fetch: F,
    ) -> CustomerResult<Option<CacheRead<T>>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = CustomerResult<Option<T>>>,
    {
        let key_str = key.to_string();

        if let Some(entry) = self.cache.get(&key_str).await? {
            if self.is_fresh(&entry) {
                match serde_json::from_slice::<T>(&entry.bytes) {
                    Ok(value) => {
                        self.counters.hits.fetch_add(1, Ordering::Relaxed);
                        tracing::debug!(key = %key_str, "Cache hit");
                        return Ok(Some(CacheRead::from_cache(value, entry.cached_at)));
                    }
                    Err(e) => {
                        let err = CacheError::Deserialization {
                            key: key_str.clone(),
                            reason: e.to_string(),
                        };
                        tracing::warn!(error = %err, "Dropping unreadable cache entry");
                    }
                }
            } else {
                self.counters.expirations.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(key = %key_str, "Cache entry expired");
            }
            self.cache.delete(&key_str).await?;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %key_str, "Cache miss");

        let Some(value) = fetch().await? else {
            return Ok(None);
        };

        let bytes = serde_json::to_vec(&value).map_err(|e| CacheError::Serialization {
            key: key_str.clone(),
            reason: e.to_string(),
        })?;
        self.cache
            .put(
                &key_str,
                CacheEntry {
                    bytes,
                    cached_at: Utc::now(),
                },
            )
            .await?;

        Ok(Some(CacheRead::from_storage(value)))
    }

    /// Invalidate a single key.
    pub async fn invalidate(&self, key: &CacheKey) -> CustomerResult<()> {
        self.cache.delete(&key.to_string()).await?;
        self.counters.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %key, "Cache key invalidated");
        Ok(())
    }

    /// Invalidate every key starting with `prefix`.
    pub async fn invalidate_prefix(&self, prefix: &str) -> CustomerResult<u64> {
        let removed = self.cache.delete_prefix(prefix).await?;
        self.counters.invalidations.fetch_add(removed, Ordering::Relaxed);
        tracing::debug!(prefix, removed, "Cache prefix invalidated");
        Ok(removed)
    }

    /// Invalidate every cached list page, paginated or not.
    pub async fn invalidate_lists(&self) -> CustomerResult<u64> {
        self.invalidate_prefix(LIST_KEY_PREFIX).await
    }

    /// Snapshot of hit/miss counters and current size.
    pub async fn stats(&self) -> CustomerResult<CacheStats> {
        Ok(CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            entry_count: self.cache.entry_count().await?,
            expirations: self.counters.expirations.load(Ordering::Relaxed),
            invalidations: self.counters.invalidations.load(Ordering::Relaxed),
        })
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        Utc::now()
            .signed_duration_since(entry.cached_at)
            .to_std()
            .map(|age| age < self.config.entry_ttl)
            .unwrap_or(true)
    }
}

impl<C> Clone for ReadThroughCache<C>
where
    C: CacheBackend,
{
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            config: self.config.clone(),
            counters: Arc::clone(&self.counters),
        }
    }
}
