//! `/orgs` handlers.

use crate::error::{AppError, ErrorBody, ValidationErrorBody};
use crate::extractors::{Actor, DocumentBody};
use crate::handlers::document;
use crate::resource::{NewOrg, Org, OrgChanges, Orgs};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/orgs",
    params(("org_id" = Option<String>, Query, description = "Id of the org to fetch. Omit to list every org")),
    responses(
        (status = 200, description = "The org, or every org when no id is given", body = [Org]),
        (status = 400, description = "Malformed org_id", body = ErrorBody),
        (status = 404, description = "Org not found", body = ErrorBody),
        (status = 500, description = "Error retrieving orgs", body = ErrorBody)
    ),
    tag = "orgs"
)]
pub async fn get_orgs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    document::fetch::<Orgs>(&state, &params).await
}

#[utoipa::path(
    post,
    path = "/orgs",
    request_body = NewOrg,
    responses(
        (status = 201, description = "Org created", body = Org),
        (status = 400, description = "Missing or invalid fields", body = ValidationErrorBody),
        (status = 500, description = "Error creating org", body = ErrorBody)
    ),
    tag = "orgs"
)]
pub async fn post_org(
    State(state): State<AppState>,
    DocumentBody(new): DocumentBody<NewOrg>,
) -> Result<(StatusCode, Json<Org>), AppError> {
    document::create::<Orgs>(&state, new).await
}

#[utoipa::path(
    put,
    path = "/orgs",
    params(("org_id" = String, Query, description = "Id of the org to update")),
    request_body = OrgChanges,
    responses(
        (status = 200, description = "Updated org", body = Org),
        (status = 400, description = "Missing org_id or empty body", body = ValidationErrorBody),
        (status = 404, description = "Org not found", body = ErrorBody),
        (status = 500, description = "Error updating org", body = ErrorBody)
    ),
    tag = "orgs"
)]
pub async fn put_org_by_query(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    DocumentBody(changes): DocumentBody<OrgChanges>,
) -> Result<Json<Org>, AppError> {
    document::update_by_query::<Orgs>(&state, &params, changes).await
}

#[utoipa::path(
    put,
    path = "/orgs/{id}",
    params(("id" = String, Path, description = "Id of the org to update")),
    request_body = OrgChanges,
    responses(
        (status = 200, description = "Updated org", body = Org),
        (status = 400, description = "Malformed id or empty body", body = ErrorBody),
        (status = 404, description = "Org not found", body = ErrorBody),
        (status = 500, description = "Error updating org", body = ErrorBody)
    ),
    tag = "orgs"
)]
pub async fn put_org(
    State(state): State<AppState>,
    Path(id): Path<String>,
    DocumentBody(changes): DocumentBody<OrgChanges>,
) -> Result<Json<Org>, AppError> {
    document::update::<Orgs>(&state, &id, "id", changes).await
}

#[utoipa::path(
    delete,
    path = "/orgs/{id}",
    params(
        ("id" = String, Path, description = "Id of the org to delete"),
        ("user_id" = Option<String>, Query, description = "Id of the user performing the delete")
    ),
    responses(
        (status = 200, description = "The deleted org", body = Org),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "Org not found", body = ErrorBody),
        (status = 500, description = "Error deleting org", body = ErrorBody)
    ),
    tag = "orgs"
)]
pub async fn delete_org(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(actor): Actor,
) -> Result<Json<Org>, AppError> {
    document::delete::<Orgs>(&state, &id, actor.as_deref()).await
}
