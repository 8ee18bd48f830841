//! Error types for the training log service
//!
//! Store-level failures, request-level failures and the status code policy
//! that maps one onto the other.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::StatusPolicy;

// == Store Error Enum ==
/// Failures reported by a key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No live entry under the key
    #[error("cache: key not found: {0}")]
    NotFound(String),

    /// `add` found a live entry under the key
    #[error("cache: key already exists: {0}")]
    AlreadyExists(String),

    /// Key is empty or longer than the store accepts
    #[error("cache: invalid key: {0}")]
    InvalidKey(String),

    /// Serialized value exceeds the per-entry limit
    #[error("cache: value of {0} bytes exceeds the item size limit")]
    ValueTooLarge(usize),

    /// Record could not be (de)serialized for storage
    #[error("cache: codec failure: {0}")]
    Codec(String),
}

// == Api Error Enum ==
/// Failure of a single resource operation, surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Absent, expired or tombstoned resource
    #[error("{0}")]
    NotFound(String),

    /// Malformed request body
    #[error("{0}")]
    DecodeFailure(String),

    /// Create collided with an existing entry
    #[error("{0}")]
    Conflict(String),

    /// Any other store failure
    #[error("{0}")]
    StoreUnavailable(String),
}

impl ApiError {
    /// Status code for this error under the given policy.
    ///
    /// `Legacy` only keeps 404 for lookups; everything else is a 500.
    pub fn status(&self, policy: StatusPolicy) -> StatusCode {
        match (policy, self) {
            (_, ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            (StatusPolicy::Legacy, _) => StatusCode::INTERNAL_SERVER_ERROR,
            (StatusPolicy::Refined, ApiError::DecodeFailure(_)) => StatusCode::BAD_REQUEST,
            (StatusPolicy::Refined, ApiError::Conflict(_)) => StatusCode::CONFLICT,
            (StatusPolicy::Refined, ApiError::StoreUnavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Pairs the error with a policy so it can become a response.
    pub fn under(self, policy: StatusPolicy) -> PolicyError {
        PolicyError {
            error: self,
            policy,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            _ => ApiError::StoreUnavailable(err.to_string()),
        }
    }
}

// == IntoResponse Implementation ==
/// An [`ApiError`] bound to the status policy of the running server.
#[derive(Debug)]
pub struct PolicyError {
    error: ApiError,
    policy: StatusPolicy,
}

impl IntoResponse for PolicyError {
    fn into_response(self) -> Response {
        let status = self.error.status(self.policy);
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (status, body).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.under(StatusPolicy::default()).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for resource operations.
pub type Result<T> = std::result::Result<T, ApiError>;
