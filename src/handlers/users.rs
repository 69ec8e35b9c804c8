//! `/users` handlers.

use crate::error::{AppError, ErrorBody, ValidationErrorBody};
use crate::extractors::{Actor, DocumentBody};
use crate::handlers::document;
use crate::resource::{NewUser, User, UserChanges, Users};
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
    path = "/users",
    params(("user_id" = Option<String>, Query, description = "Id of the user to fetch. Omit to list every user")),
    responses(
        (status = 200, description = "The user, or every user when no id is given", body = [User]),
        (status = 400, description = "Malformed user_id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Error retrieving users", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    document::fetch::<Users>(&state, &params).await
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing or invalid fields", body = ValidationErrorBody),
        (status = 500, description = "Error creating user", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn post_user(
    State(state): State<AppState>,
    DocumentBody(new): DocumentBody<NewUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    document::create::<Users>(&state, new).await
}

#[utoipa::path(
    put,
    path = "/users",
    params(("user_id" = String, Query, description = "Id of the user to update")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Missing user_id or empty body", body = ValidationErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Error updating user", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn put_user_by_query(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    DocumentBody(changes): DocumentBody<UserChanges>,
) -> Result<Json<User>, AppError> {
    document::update_by_query::<Users>(&state, &params, changes).await
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Id of the user to update")),
    request_body = UserChanges,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Malformed id or empty body", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Error updating user", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn put_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    DocumentBody(changes): DocumentBody<UserChanges>,
) -> Result<Json<User>, AppError> {
    document::update::<Users>(&state, &id, "id", changes).await
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "Id of the user to delete"),
        ("user_id" = Option<String>, Query, description = "Id of the user performing the delete")
    ),
    responses(
        (status = 200, description = "The deleted user", body = User),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Error deleting user", body = ErrorBody)
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(actor): Actor,
) -> Result<Json<User>, AppError> {
    document::delete::<Users>(&state, &id, actor.as_deref()).await
}
