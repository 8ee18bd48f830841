//! Resource records and response bodies
//!
//! [`Resource`] is what makes a record type routable: its store namespace,
//! how to read and reconcile its identity, and whether it has a listing.

pub mod activity;
pub mod responses;
pub mod user;

use serde::{de::DeserializeOwned, Serialize};

pub use activity::Activity;
pub use responses::{HealthResponse, StatsResponse};
pub use user::User;

/// A record kind served under its own route prefix.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Store key namespace, e.g. `user` gives keys `user:<id>`
    const KIND: &'static str;

    /// Human-readable name used in error messages
    const LABEL: &'static str;

    /// Message for the collection listing stub; None means no listing route
    const LISTING_STUB: Option<&'static str> = None;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Fills an empty identity from the path; a non-empty body id wins.
    fn reconcile_id(&mut self, path_id: &str) {
        if self.id().is_empty() {
            self.set_id(path_id.to_string());
        }
    }

    /// Stored records with an empty identity count as absent.
    fn is_tombstone(&self) -> bool {
        self.id().is_empty()
    }
}
