//! Training Log - users and activities over a volatile key-value cache
//!
//! Each record kind is served through the same four operations: read-one,
//! replace-one (upsert), create-one (add-if-absent) and delete-one. The
//! store may forget records at any time; forgotten records read as absent.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::{Config, StatusPolicy};
pub use store::{KeyValueStore, MemoryStore, ResourceStore};
pub use tasks::spawn_cleanup_task;
