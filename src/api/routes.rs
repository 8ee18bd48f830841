//! API Routes
//!
//! Route table assembly. Every resource kind is registered under its own
//! prefix before the server starts; a duplicate prefix fails assembly.

use std::collections::BTreeSet;

use axum::{
    routing::{get, patch},
    Router,
};
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, find_handler, health_handler, listing_stub_handler,
    replace_handler, stats_handler, AppState,
};
use crate::models::{Activity, Resource, User};

/// Route table misconfiguration, detected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("prefix {0} is already registered")]
    DuplicatePrefix(String),

    #[error("prefix {0:?} must start with '/' and not end with one")]
    InvalidPrefix(String),
}

/// Collects per-kind routers before they are merged into one.
pub struct ResourceRegistry {
    prefixes: BTreeSet<String>,
    router: Router<AppState>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            prefixes: BTreeSet::new(),
            router: Router::new(),
        }
    }

    /// Installs the four record routes for `T` under `prefix`:
    ///
    /// - `GET {prefix}/:id` read-one
    /// - `PATCH {prefix}` replace-one (id from the body)
    /// - `PUT {prefix}/:id` create-one
    /// - `DELETE {prefix}/:id` delete-one
    ///
    /// Kinds with a listing stub also answer `GET {prefix}` and `GET {prefix}/`.
    pub fn register<T: Resource>(mut self, prefix: &str) -> Result<Self, RouteError> {
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            return Err(RouteError::InvalidPrefix(prefix.to_string()));
        }
        if !self.prefixes.insert(prefix.to_string()) {
            return Err(RouteError::DuplicatePrefix(prefix.to_string()));
        }

        let item = format!("{prefix}/:id");
        let mut collection = patch(replace_handler::<T>);
        if T::LISTING_STUB.is_some() {
            collection = collection.get(listing_stub_handler::<T>);
            self.router = self
                .router
                .route(&format!("{prefix}/"), get(listing_stub_handler::<T>));
        }

        self.router = self.router.route(prefix, collection).route(
            &item,
            get(find_handler::<T>)
                .put(create_handler::<T>)
                .delete(delete_handler::<T>),
        );
        Ok(self)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.prefixes.iter().map(String::as_str)
    }

    /// Adds the operational endpoints and middleware, and binds the state.
    pub fn build(self, state: AppState) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        self.router
            .route("/stats", get(stats_handler))
            .route("/health", get(health_handler))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the full service router with users and activities.
pub fn create_router(state: AppState) -> Result<Router, RouteError> {
    Ok(ResourceRegistry::new()
        .register::<User>("/users")?
        .register::<Activity>("/activities")?
        .build(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::config::StatusPolicy;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let cache = MemoryStore::new(CacheStore::new(100, Duration::from_secs(300)));
        create_router(AppState::new(cache, StatusPolicy::Refined)).unwrap()
    }

    #[test]
    fn test_duplicate_prefix_is_rejected() {
        let result = ResourceRegistry::new()
            .register::<User>("/users")
            .and_then(|registry| registry.register::<Activity>("/users"));

        assert_eq!(
            result.err(),
            Some(RouteError::DuplicatePrefix("/users".to_string()))
        );
    }

    #[test]
    fn test_malformed_prefix_is_rejected() {
        for prefix in ["users", "/users/", "/", ""] {
            let result = ResourceRegistry::new().register::<User>(prefix);
            assert!(matches!(result, Err(RouteError::InvalidPrefix(_))), "{prefix}");
        }
    }

    #[test]
    fn test_registry_records_prefixes() {
        let registry = ResourceRegistry::new()
            .register::<User>("/users")
            .and_then(|registry| registry.register::<User>("/people"))
            .unwrap();

        let prefixes: Vec<_> = registry.prefixes().collect();
        assert_eq!(prefixes, vec!["/people", "/users"]);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_activity_listing_is_stubbed() {
        for uri in ["/activities", "/activities/"] {
            let response = create_test_app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_user_get_not_found() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/users/nobody").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
