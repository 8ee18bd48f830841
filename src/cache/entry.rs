//! Cache Entry Module
//!
//! A single serialized record plus its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// One stored value and the instant after which it reads as absent.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized record
    pub value: String,
    /// Expiry deadline, None = lives until evicted or deleted
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates an entry that expires `ttl` from now.
    ///
    /// A zero TTL means the entry never expires, as with memcache.
    pub fn new(value: String, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        Self { value, expires_at }
    }

    /// True once the deadline has been reached.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}
