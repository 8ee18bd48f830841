//! Key-Value Store Adapter
//!
//! The only collaborator resource handlers talk to. [`KeyValueStore`] is the
//! raw capability set over string keys; [`ResourceStore`] layers typed
//! records and per-kind key namespaces on top of it.

mod memory;
mod resource;

use async_trait::async_trait;

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use resource::ResourceStore;

/// Raw get / upsert / add-if-absent / delete over serialized values.
///
/// Implementations must make `add` atomic: of two concurrent adds on the
/// same key, exactly one succeeds.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Live value under `key`, None if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` whether or not `key` is live.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Writes `value` only if `key` is not live, else `AlreadyExists`.
    async fn add(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`, `NotFound` if it was not live.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
