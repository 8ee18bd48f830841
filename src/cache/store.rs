//! Cache Store Module
//!
//! Bounded map of serialized records with TTL expiry and LRU eviction.
//! All operations are synchronous; callers serialize access with a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::StoreError;

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    max_entries: usize,
    default_ttl: Duration,
}

impl CacheStore {
    /// Creates an empty store holding at most `max_entries` live records.
    ///
    /// A zero `default_ttl` keeps records until they are evicted or deleted.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::default(),
            max_entries: max_entries.max(1),
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the live value under `key`.
    ///
    /// An expired entry is dropped on the spot and reads as absent.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if self.purge_if_expired(key) || !self.entries.contains_key(key) {
            self.stats.misses += 1;
            return None;
        }

        self.stats.hits += 1;
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` whether or not the key is live.
    pub fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        validate(key, &value)?;
        self.insert(key, value);
        Ok(())
    }

    // == Add ==
    /// Stores `value` only if no live entry exists under `key`.
    pub fn add(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        validate(key, &value)?;
        self.purge_if_expired(key);

        if self.entries.contains_key(key) {
            self.stats.rejected_adds += 1;
            return Err(StoreError::AlreadyExists(key.to_string()));
        }

        self.insert(key, value);
        Ok(())
    }

    // == Delete ==
    /// Removes the live entry under `key`.
    pub fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.purge_if_expired(key);

        match self.entries.remove(key) {
            Some(_) => {
                self.lru.remove(key);
                self.sync_total();
                Ok(())
            }
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    // == Cleanup Expired ==
    /// Drops every expired entry and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        let lru = &mut self.lru;
        self.entries.retain(|key, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                lru.remove(key);
            }
            keep
        });

        let removed = before - self.entries.len();
        self.stats.expirations += removed as u64;
        self.sync_total();
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, value: String) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            if let Some(victim) = self.lru.evict_oldest() {
                self.entries.remove(&victim);
                self.stats.evictions += 1;
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, self.default_ttl));
        self.lru.touch(key);
        self.sync_total();
    }

    /// Removes `key` if its entry has expired, reporting whether it did.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        let expired = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_expired());

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.expirations += 1;
            self.sync_total();
        }
        expired
    }

    fn sync_total(&mut self) {
        self.stats.total_entries = self.entries.len();
    }
}

fn validate(key: &str, value: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    if value.len() > MAX_VALUE_SIZE {
        return Err(StoreError::ValueTooLarge(value.len()));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn store() -> CacheStore {
        CacheStore::new(100, Duration::from_secs(300))
    }

    #[test]
    fn test_set_then_get() {
        let mut store = store();
        store.set("user:1", "a".to_string()).unwrap();

        assert_eq!(store.get("user:1").as_deref(), Some("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut store = store();
        assert!(store.get("user:404").is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = store();
        store.set("k", "first".to_string()).unwrap();
        store.set("k", "second".to_string()).unwrap();

        assert_eq!(store.get("k").as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_refuses_live_key() {
        let mut store = store();
        store.add("k", "first".to_string()).unwrap();

        let err = store.add("k", "second".to_string()).unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("k".to_string()));
        assert_eq!(store.get("k").as_deref(), Some("first"));
        assert_eq!(store.stats().rejected_adds, 1);
    }

    #[test]
    fn test_add_succeeds_after_expiry() {
        let mut store = CacheStore::new(10, Duration::from_millis(20));
        store.add("k", "first".to_string()).unwrap();
        sleep(Duration::from_millis(40));

        store.add("k", "second".to_string()).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("second"));
    }

    #[test]
    fn test_delete_then_get() {
        let mut store = store();
        store.set("k", "v".to_string()).unwrap();
        store.delete("k").unwrap();

        assert!(store.is_empty());
        assert!(store.get("k").is_none());
    }

    #[test]
    fn test_delete_missing_or_expired() {
        let mut store = CacheStore::new(10, Duration::from_millis(20));
        assert_eq!(store.delete("k"), Err(StoreError::NotFound("k".to_string())));

        store.set("k", "v".to_string()).unwrap();
        sleep(Duration::from_millis(40));
        assert_eq!(store.delete("k"), Err(StoreError::NotFound("k".to_string())));
    }

    #[test]
    fn test_expired_entry_reads_absent() {
        let mut store = CacheStore::new(10, Duration::from_millis(20));
        store.set("k", "v".to_string()).unwrap();
        sleep(Duration::from_millis(40));

        assert!(store.get("k").is_none());
        assert_eq!(store.stats().expirations, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let mut store = CacheStore::new(2, Duration::from_secs(300));
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();
        store.get("a");
        store.add("c", "3".to_string()).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("b").is_none());
        assert!(store.get("a").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_cleanup_expired_counts() {
        let mut store = CacheStore::new(10, Duration::from_millis(20));
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();
        sleep(Duration::from_millis(40));

        assert_eq!(store.cleanup_expired(), 2);
        assert_eq!(store.stats().total_entries, 0);
    }

    #[test]
    fn test_rejects_bad_keys_and_large_values() {
        let mut store = store();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        assert!(matches!(store.set("", "v".into()), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.set("a b", "v".into()), Err(StoreError::InvalidKey(_))));
        assert!(matches!(store.set(&long_key, "v".into()), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            store.add("k", "x".repeat(MAX_VALUE_SIZE + 1)),
            Err(StoreError::ValueTooLarge(_))
        ));
    }
}
