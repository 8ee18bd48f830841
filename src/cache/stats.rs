//! Cache Statistics Module

use serde::Serialize;

// == Cache Stats ==
/// Counters describing how the store has been used.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Entries dropped to stay under capacity
    pub evictions: u64,
    /// Entries dropped because their TTL elapsed
    pub expirations: u64,
    /// `add` calls refused because the key was live
    pub rejected_adds: u64,
    /// Live entries right now
    pub total_entries: usize,
}

impl CacheStats {
    /// hits / (hits + misses), 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.hits + self.misses {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
