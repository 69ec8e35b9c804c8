//! Extract the acting user from the request query (`?user_id=`).

use crate::resource::ACTOR_PARAM;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Optional id of the user performing the request. Recorded in logs only; it never scopes
/// or authorizes the operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(mut q)| q.remove(ACTOR_PARAM))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Ok(Actor(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn actor_of(uri: &str) -> Actor {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        Actor::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_user_id_from_query() {
        assert_eq!(actor_of("/orgs/1?user_id=abc").await, Actor(Some("abc".into())));
        assert_eq!(actor_of("/orgs/1?user_id=").await, Actor(None));
        assert_eq!(actor_of("/orgs/1").await, Actor(None));
    }
}
