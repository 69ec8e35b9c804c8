//! Per-resource routers. Each route is a pipeline of [validation stage, handler];
//! the router is meant to be nested under the resource prefix (`/users`, `/orgs`).

use crate::handlers::{orgs, users};
use crate::resource::{Orgs, Resource, Users};
use crate::service::validate_request;
use crate::state::AppState;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(users::get_users)
                .merge(post(users::post_user).route_layer(from_fn_with_state(Users::CREATE_RULES, validate_request)))
                .merge(
                    put(users::put_user_by_query)
                        .route_layer(from_fn_with_state(Users::ID_QUERY_RULES, validate_request)),
                ),
        )
        .route("/:id", put(users::put_user).delete(users::delete_user))
        .with_state(state)
}

pub fn org_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(orgs::get_orgs)
                .merge(post(orgs::post_org).route_layer(from_fn_with_state(Orgs::CREATE_RULES, validate_request)))
                .merge(
                    put(orgs::put_org_by_query)
                        .route_layer(from_fn_with_state(Orgs::ID_QUERY_RULES, validate_request)),
                ),
        )
        .route("/:id", put(orgs::put_org).delete(orgs::delete_org))
        .with_state(state)
}
