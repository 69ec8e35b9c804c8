//! CrudService and the request validation stage.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{validate_request, FieldCheck, FieldError, Location, RequestValidator, RuleSet};
