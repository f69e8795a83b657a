//! Read-through cache for customer reads.
//!
//! Values are stored as serialized JSON bytes, so a hit hands back exactly
//! what was written. Entries expire a fixed TTL after they are written.
//! Writers invalidate explicitly: list pages by prefix, single records by key.
//!
//! # Example
//!
//! ```ignore
//! let cache = ReadThroughCache::new(Arc::new(InMemoryCacheBackend::new()), CacheConfig::default());
//!
//! let read = cache
//!     .get_or_fetch(&CacheKey::for_list(&filter), || async { repo.list(filter).await.map(Some) })
//!     .await?;
//! if read.as_ref().is_some_and(|r| r.was_cache_hit()) {
//!     tracing::debug!("served from cache");
//! }
//!
//! // After any write
//! cache.invalidate_lists().await?;
//! ```

pub mod keys;
pub mod memory;
pub mod read;
pub mod read_through;
pub mod traits;

pub use keys::{CacheKey, CUSTOMER_KEY_PREFIX, LIST_KEY_PREFIX};
pub use memory::InMemoryCacheBackend;
pub use read::CacheRead;
pub use read_through::{CacheConfig, ReadThroughCache};
pub use traits::{CacheBackend, CacheEntry, CacheStats};
