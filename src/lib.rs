//! Customer API: CRUD over user and org documents with required-field validation.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod resource;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use openapi::{ApiDoc, DOCS_PATH, OPENAPI_PATH};
pub use resource::{Org, Orgs, Resource, User, Users, COLLECTIONS};
pub use routes::{common_routes, org_routes, user_routes};
pub use service::CrudService;
pub use state::AppState;
pub use store::{ensure_collections, ensure_database_exists, DocumentStore, MemoryDocumentStore, PgDocumentStore};

use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest request body accepted, in bytes.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: resource routers under their prefixes, health checks, Swagger UI, and the
/// trace and body-limit layers.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/users", user_routes(state.clone()))
        .nest("/orgs", org_routes(state.clone()))
        .merge(common_routes(state))
        .merge(openapi::docs_routes())
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
