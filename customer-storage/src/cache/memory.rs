//! In-process cache backend on a concurrent hash map.

use async_trait::async_trait;
use customer_core::CustomerResult;
use dashmap::DashMap;

use super::traits::{CacheBackend, CacheEntry};

/// Process-local cache backend.
///
/// Sharded locking in `DashMap` lets concurrent requests read and populate
/// different keys without contending on a single lock.
#[derive(Debug, Default)]
pub struct InMemoryCacheBackend {
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheBackend for InMemoryCacheBackend {
    async fn get(&self, key: &str) -> CustomerResult<Option<CacheEntry>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn put(&self, key: &str, entry: CacheEntry) -> CustomerResult<()> {
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CustomerResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> CustomerResult<u64> {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before.saturating_sub(self.entries.len()) as u64)
    }

    async fn entry_count(&self) -> CustomerResult<u64> {
        Ok(self.entries.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(bytes: &[u8]) -> CacheEntry {
        CacheEntry {
            bytes: bytes.to_vec(),
            cached_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_put_get_delete() -> CustomerResult<()> {
        let backend = InMemoryCacheBackend::new();
        assert!(backend.get("Customer_1").await?.is_none());

        backend.put("Customer_1", entry(b"one")).await?;
        let hit = backend.get("Customer_1").await?;
        assert_eq!(hit.map(|e| e.bytes), Some(b"one".to_vec()));

        backend.delete("Customer_1").await?;
        assert!(backend.get("Customer_1").await?.is_none());
        backend.delete("Customer_1").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_prefix_only_removes_matching_keys() -> CustomerResult<()> {
        let backend = InMemoryCacheBackend::new();
        backend.put("AllCustomers", entry(b"[]")).await?;
        backend.put("AllCustomers_1_1", entry(b"[]")).await?;
        backend.put("Customer_1", entry(b"{}")).await?;

        assert_eq!(backend.delete_prefix("AllCustomers").await?, 2);
        assert_eq!(backend.entry_count().await?, 1);
        assert!(backend.get("Customer_1").await?.is_some());
        Ok(())
    }
}
