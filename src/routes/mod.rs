//! Route tables.

pub mod common;
pub mod resources;

pub use common::common_routes;
pub use resources::{org_routes, user_routes};
