//! Health routes: liveness, store readiness, build version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthBody {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ReadyBody {
    pub status: String,
    pub database: String,
}

#[derive(Serialize, ToSchema)]
pub struct VersionBody {
    pub name: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up", body = HealthBody)),
    tag = "health"
)]
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok".into() })
}

/// The shared document store must answer a ping.
#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Document store reachable", body = ReadyBody),
        (status = 503, description = "Document store unreachable", body = ReadyBody)
    ),
    tag = "health"
)]
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.store.ping().await {
        tracing::warn!(error = %e, "document store not ready");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded".into(),
                database: "unavailable".into(),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok".into(),
        database: "ok".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/version",
    responses((status = 200, description = "Crate name and version", body = VersionBody)),
    tag = "health"
)]
pub async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME").into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
