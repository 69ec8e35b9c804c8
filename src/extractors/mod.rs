//! Request extractors shared by resource handlers.

pub mod actor;
pub mod body;

pub use actor::Actor;
pub use body::DocumentBody;
