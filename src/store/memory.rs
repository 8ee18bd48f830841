//! In-process store backed by the TTL/LRU cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::StoreError;

/// Shared handle to a [`CacheStore`]; clones see the same entries.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    cache: Arc<RwLock<CacheStore>>,
}

impl MemoryStore {
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Sized and aged according to the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(
            config.max_entries,
            Duration::from_secs(config.default_ttl),
        ))
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Drops expired entries, returning how many went.
    pub async fn sweep_expired(&self) -> usize {
        self.cache.write().await.cleanup_expired()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        // write lock: a read refreshes LRU order and may purge
        Ok(self.cache.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.cache.write().await.set(key, value)
    }

    async fn add(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.cache.write().await.add(key, value)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.cache.write().await.delete(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(CacheStore::new(100, Duration::from_secs(300)))
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = store();
        let other = store.clone();

        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(other.stats().await.total_entries, 1);
    }

    #[tokio::test]
    async fn test_concurrent_adds_have_one_winner() {
        let store = store();

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.add("race", n.to_string()).await })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(store.stats().await.rejected_adds, 15);
    }

    #[tokio::test]
    async fn test_sweep_expired() {
        let store = MemoryStore::new(CacheStore::new(10, Duration::from_millis(20)));
        store.set("k", "v".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.sweep_expired().await, 1);
        assert!(store.get("k").await.unwrap().is_none());
    }
}
