//! Required-field validation: declarative rule sets and the middleware stage that runs them.

use crate::error::{AppError, ErrorBody};
use crate::BODY_LIMIT_BYTES;
use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Where a checked field is looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
}

/// One presence check.
#[derive(Clone, Copy, Debug)]
pub struct FieldCheck {
    pub field: &'static str,
    pub location: Location,
    pub message: &'static str,
}

impl FieldCheck {
    pub const fn body(field: &'static str, message: &'static str) -> Self {
        FieldCheck {
            field,
            location: Location::Body,
            message,
        }
    }

    pub const fn query(field: &'static str, message: &'static str) -> Self {
        FieldCheck {
            field,
            location: Location::Query,
            message,
        }
    }
}

/// Static list of checks attached to one route.
#[derive(Clone, Copy, Debug)]
pub struct RuleSet(pub &'static [FieldCheck]);

impl RuleSet {
    fn inspects_body(&self) -> bool {
        self.0.iter().any(|c| c.location == Location::Body)
    }
}

/// One failed check as reported to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Run every check in `rules`. All failures are collected; none short-circuits the others.
    ///
    /// A body field is present when `body` is a JSON object holding the key (a `null` value
    /// counts as present). A query field is present when the key appears in `query`.
    pub fn validate(
        rules: RuleSet,
        body: Option<&Value>,
        query: &HashMap<String, String>,
    ) -> Result<(), AppError> {
        let object = body.and_then(Value::as_object);
        let errors: Vec<FieldError> = rules
            .0
            .iter()
            .filter(|check| match check.location {
                Location::Body => !object.is_some_and(|o| o.contains_key(check.field)),
                Location::Query => !query.contains_key(check.field),
            })
            .map(|check| FieldError {
                kind: "field".into(),
                msg: check.message.into(),
                path: check.field.into(),
                location: check.location,
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

/// Middleware stage: buffers the body, runs the route's rule set, then forwards an identical
/// request to the handler. Use with `axum::middleware::from_fn_with_state`.
pub async fn validate_request(State(rules): State<RuleSet>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, BODY_LIMIT_BYTES).await {
        Ok(b) => b,
        Err(_) => {
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorBody {
                    error: "request body too large".into(),
                }),
            )
                .into_response();
        }
    };
    let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(q)| q)
        .unwrap_or_default();
    let json = if rules.inspects_body() {
        serde_json::from_slice::<Value>(&bytes).ok()
    } else {
        None
    };
    if let Err(e) = RequestValidator::validate(rules, json.as_ref(), &query) {
        tracing::debug!(method = %parts.method, uri = %parts.uri, "request rejected by validation");
        return e.into_response();
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: RuleSet = RuleSet(&[
        FieldCheck::body("name", "name is required"),
        FieldCheck::body("email", "email is required"),
    ]);

    fn errors_of(result: Result<(), AppError>) -> Vec<FieldError> {
        match result {
            Err(AppError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn passes_when_all_fields_present() {
        let body = json!({ "name": "A", "email": "a@x.com" });
        assert!(RequestValidator::validate(RULES, Some(&body), &HashMap::new()).is_ok());
    }

    #[test]
    fn null_counts_as_present() {
        let body = json!({ "name": null, "email": "a@x.com" });
        assert!(RequestValidator::validate(RULES, Some(&body), &HashMap::new()).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let body = json!({ "other": 1 });
        let errors = errors_of(RequestValidator::validate(RULES, Some(&body), &HashMap::new()));
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "email"]);
        assert_eq!(errors[1].msg, "email is required");
        assert_eq!(errors[1].location, Location::Body);
    }

    #[test]
    fn non_object_body_misses_everything() {
        let body = json!(["name", "email"]);
        let errors = errors_of(RequestValidator::validate(RULES, Some(&body), &HashMap::new()));
        assert_eq!(errors.len(), 2);
        let errors = errors_of(RequestValidator::validate(RULES, None, &HashMap::new()));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn query_checks_look_at_query_only() {
        const QUERY_RULES: RuleSet = RuleSet(&[FieldCheck::query("user_id", "user_id is required")]);
        let rules = QUERY_RULES;
        let body = json!({ "user_id": "x" });
        let errors = errors_of(RequestValidator::validate(rules, Some(&body), &HashMap::new()));
        assert_eq!(errors[0].location, Location::Query);

        let query = HashMap::from([("user_id".to_string(), String::new())]);
        assert!(RequestValidator::validate(rules, None, &query).is_ok());
    }

    #[test]
    fn field_error_serializes_with_type_key() {
        let err = FieldError {
            kind: "field".into(),
            msg: "address is required".into(),
            path: "address".into(),
            location: Location::Body,
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "type": "field", "msg": "address is required", "path": "address", "location": "body" })
        );
    }
}
