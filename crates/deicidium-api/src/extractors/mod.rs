//! Axum extractors for request handling
//!
//! Custom extractors for authentication and validated input.

mod auth;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use validated::{json_rejection, ValidatedQuery};
