//! API Module
//!
//! HTTP surface of the service.
//!
//! # Endpoints
//! - `GET /users/:id`, `PATCH /users`, `PUT /users/:id`, `DELETE /users/:id`
//! - the same four under `/activities`, plus the `GET /activities` stub
//! - `GET /stats` - Store statistics
//! - `GET /health` - Health check

pub mod handlers;
pub mod representation;
pub mod routes;

pub use handlers::AppState;
pub use representation::Representation;
pub use routes::{create_router, ResourceRegistry, RouteError};
