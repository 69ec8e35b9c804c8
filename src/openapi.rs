//! OpenAPI document generated from the handler annotations.

use crate::error::{ErrorBody, ValidationErrorBody};
use crate::handlers::{orgs, users};
use crate::resource::{NewOrg, NewUser, Org, OrgChanges, User, UserChanges};
use crate::service::{FieldError, Location};
use crate::routes::common;
use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Interactive Swagger UI.
pub const DOCS_PATH: &str = "/api-docs";
/// Fixed path of the machine-readable API description.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "Customer API", description = "Customer API Information"),
    paths(
        users::get_users,
        users::post_user,
        users::put_user_by_query,
        users::put_user,
        users::delete_user,
        orgs::get_orgs,
        orgs::post_org,
        orgs::put_org_by_query,
        orgs::put_org,
        orgs::delete_org,
        common::health,
        common::ready,
        common::version,
    ),
    components(schemas(
        User, NewUser, UserChanges,
        Org, NewOrg, OrgChanges,
        ErrorBody, ValidationErrorBody, FieldError, Location,
        common::HealthBody, common::ReadyBody, common::VersionBody
    )),
    tags(
        (name = "users", description = "User documents"),
        (name = "orgs", description = "Org documents"),
        (name = "health", description = "Liveness, readiness and version checks")
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/api-docs`, backed by the OpenAPI JSON at `/api-docs/openapi.json`.
pub fn docs_routes() -> Router {
    Router::new().merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}
