//! HTTP handlers for the users and orgs resources.

pub mod document;
pub mod orgs;
pub mod users;
