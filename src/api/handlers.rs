//! API Handlers
//!
//! The resource handler set, written once and instantiated per record kind.
//! Each operation issues at most one store call and maps its outcome to a
//! status code and body. Nothing is retried and nothing is logged here.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::representation::Representation;
use crate::config::{Config, StatusPolicy};
use crate::error::{ApiError, Result, StoreError};
use crate::models::{HealthResponse, Resource, StatsResponse};
use crate::store::{MemoryStore, ResourceStore};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Typed view used by the resource handlers
    pub resources: ResourceStore,
    /// The same store, for stats and expiry sweeps
    pub cache: MemoryStore,
    pub policy: StatusPolicy,
}

impl AppState {
    pub fn new(cache: MemoryStore, policy: StatusPolicy) -> Self {
        Self {
            resources: ResourceStore::new(cache.clone()),
            cache,
            policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(MemoryStore::from_config(config), config.status_policy)
    }

    fn reply<T: Resource>(
        &self,
        status: StatusCode,
        format: Representation,
        outcome: Result<T>,
    ) -> Response {
        let body = outcome.and_then(|record| format.encode(&record));
        match body {
            Ok(body) => {
                (status, [(header::CONTENT_TYPE, format.content_type())], body).into_response()
            }
            Err(err) => err.under(self.policy).into_response(),
        }
    }
}

// == Handler Set ==

/// Looks a record up; absent, unreadable and tombstoned entries are NotFound.
pub async fn read_one<T: Resource>(store: &ResourceStore, id: &str) -> Result<T> {
    match store.get::<T>(id).await {
        Ok(Some(record)) if !record.is_tombstone() => Ok(record),
        _ => Err(ApiError::NotFound(format!("{} could not be found.", T::LABEL))),
    }
}

/// Overwrites the record under the id carried in the body.
///
/// This is an upsert: replacing an absent record creates it.
pub async fn replace_one<T: Resource>(store: &ResourceStore, record: T) -> Result<T> {
    if record.id().is_empty() {
        return Err(ApiError::DecodeFailure(format!(
            "{} body must carry a non-empty id",
            T::LABEL
        )));
    }
    store.set(&record).await?;
    Ok(record)
}

/// Creates the record unless its key is already live.
///
/// The path id seeds the identity; a non-empty id in the body overrides it.
pub async fn create_one<T: Resource>(
    store: &ResourceStore,
    path_id: &str,
    mut record: T,
) -> Result<T> {
    record.reconcile_id(path_id);
    store.add(&record).await?;
    Ok(record)
}

/// Deletes the record; deleting an absent one is reported as NotFound.
pub async fn delete_one<T: Resource>(store: &ResourceStore, id: &str) -> Result<()> {
    store.delete::<T>(id).await.map_err(|err| match err {
        StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
        other => other.into(),
    })
}

// == HTTP Adapters ==

/// Handler for GET {prefix}/:id
pub async fn find_handler<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let outcome = read_one::<T>(&state.resources, &id).await;
    state.reply(StatusCode::OK, Representation::negotiate(&headers), outcome)
}

/// Handler for PATCH {prefix}
pub async fn replace_handler<T: Resource>(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let outcome = match Representation::of_request(&headers).decode::<T>(&body) {
        Ok(record) => replace_one(&state.resources, record).await,
        Err(err) => Err(err),
    };
    state.reply(StatusCode::OK, Representation::negotiate(&headers), outcome)
}

/// Handler for PUT {prefix}/:id
pub async fn create_handler<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let outcome = match Representation::of_request(&headers).decode::<T>(&body) {
        Ok(record) => create_one(&state.resources, &id, record).await,
        Err(err) => Err(err),
    };
    state.reply(StatusCode::CREATED, Representation::negotiate(&headers), outcome)
}

/// Handler for DELETE {prefix}/:id
///
/// Success has no body.
pub async fn delete_handler<T: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match delete_one::<T>(&state.resources, &id).await {
        Ok(()) => StatusCode::OK.into_response(),
        // legacy reports a missing key on delete as a store failure
        Err(ApiError::NotFound(msg)) if state.policy == StatusPolicy::Legacy => {
            ApiError::StoreUnavailable(msg).under(state.policy).into_response()
        }
        Err(err) => err.under(state.policy).into_response(),
    }
}

/// Handler for GET {prefix} on kinds that only stub their listing.
pub async fn listing_stub_handler<T: Resource>() -> ApiError {
    ApiError::NotFound(T::LISTING_STUB.unwrap_or("Not Found").to_string())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
