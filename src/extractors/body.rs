//! JSON body extractor that reports every decoding problem as a 400 `AppError`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Typed request body. Unknown or mistyped fields are rejected according to `T`'s serde rules.
#[derive(Debug)]
pub struct DocumentBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for DocumentBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let parsed = serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e)))?;
        Ok(DocumentBody(parsed))
    }
}
