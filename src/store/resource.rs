//! Typed records over a raw key-value store.

use std::sync::Arc;

use super::KeyValueStore;
use crate::error::StoreError;
use crate::models::Resource;

/// Serializes records to JSON and keys them as `<kind>:<id>`.
///
/// The kind prefix keeps users and activities with the same id apart in the
/// store's single flat key space.
#[derive(Clone)]
pub struct ResourceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ResourceStore {
    pub fn new(backend: impl KeyValueStore) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn key_for<T: Resource>(id: &str) -> String {
        format!("{}:{}", T::KIND, id)
    }

    /// Decoded record under `id`, None when the key is not live.
    pub async fn get<T: Resource>(&self, id: &str) -> Result<Option<T>, StoreError> {
        let key = Self::key_for::<T>(id);
        match self.backend.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| StoreError::Codec(err.to_string())),
            None => Ok(None),
        }
    }

    /// Upserts `record` under its own id.
    pub async fn set<T: Resource>(&self, record: &T) -> Result<(), StoreError> {
        let key = Self::key_for::<T>(record.id());
        self.backend.set(&key, encode(record)?).await
    }

    /// Writes `record` under its own id unless that key is live.
    pub async fn add<T: Resource>(&self, record: &T) -> Result<(), StoreError> {
        let key = Self::key_for::<T>(record.id());
        self.backend.add(&key, encode(record)?).await
    }

    pub async fn delete<T: Resource>(&self, id: &str) -> Result<(), StoreError> {
        self.backend.delete(&Self::key_for::<T>(id)).await
    }
}

fn encode<T: Resource>(record: &T) -> Result<String, StoreError> {
    serde_json::to_string(record).map_err(|err| StoreError::Codec(err.to_string()))
}
