//! Resource-generic handler bodies. The per-resource modules bind these to routes and docs.

use crate::error::AppError;
use crate::resource::Resource;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

/// Parse a client-supplied document id. Malformed ids are a client error.
pub fn parse_id(raw: &str, param: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("{} must be a valid document id", param)))
}

fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", R::TITLE))
}

/// Without the id query parameter: every document. With it: that one document.
pub async fn fetch<R: Resource>(state: &AppState, params: &HashMap<String, String>) -> Result<Response, AppError> {
    match params.get(R::ID_PARAM) {
        None => {
            let records = CrudService::list::<R>(state.store.as_ref()).await?;
            Ok(Json(records).into_response())
        }
        Some(raw) => {
            let id = parse_id(raw, R::ID_PARAM)?;
            let record = CrudService::read::<R>(state.store.as_ref(), id)
                .await?
                .ok_or_else(not_found::<R>)?;
            Ok(Json(record).into_response())
        }
    }
}

pub async fn create<R: Resource>(state: &AppState, new: R::New) -> Result<(StatusCode, Json<R::Record>), AppError> {
    let record = CrudService::create::<R>(state.store.as_ref(), &new).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<R: Resource>(
    state: &AppState,
    raw_id: &str,
    param: &str,
    changes: R::Changes,
) -> Result<Json<R::Record>, AppError> {
    let id = parse_id(raw_id, param)?;
    let record = CrudService::update::<R>(state.store.as_ref(), id, &changes)
        .await?
        .ok_or_else(not_found::<R>)?;
    Ok(Json(record))
}

/// Update addressed by the id query parameter rather than the path.
pub async fn update_by_query<R: Resource>(
    state: &AppState,
    params: &HashMap<String, String>,
    changes: R::Changes,
) -> Result<Json<R::Record>, AppError> {
    let raw_id = params
        .get(R::ID_PARAM)
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", R::ID_PARAM)))?;
    update::<R>(state, raw_id, R::ID_PARAM, changes).await
}

pub async fn delete<R: Resource>(
    state: &AppState,
    raw_id: &str,
    actor: Option<&str>,
) -> Result<Json<R::Record>, AppError> {
    let id = parse_id(raw_id, "id")?;
    let record = CrudService::delete::<R>(state.store.as_ref(), id, actor)
        .await?
        .ok_or_else(not_found::<R>)?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid_and_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "id").unwrap(), id);
        match parse_id("64b7f0c2e13f4a0012345678", "user_id") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "user_id must be a valid document id"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
