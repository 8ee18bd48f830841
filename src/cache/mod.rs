//! Cache Module
//!
//! In-memory record cache with TTL expiry and LRU eviction. This is the
//! storage engine behind [`crate::store::MemoryStore`].

mod entry;
mod lru;
mod stats;
mod store;


pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum key length in bytes
pub const MAX_KEY_LENGTH: usize = 250;

/// Maximum serialized value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024;
