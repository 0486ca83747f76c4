//! Middleware for the Agilix API
//!
//! - `auth`: Bearer JWT authentication, injecting [`AuthContext`] into
//!   request extensions
//!
//! [`AuthContext`]: crate::auth::AuthContext

mod auth;

pub use auth::{auth_middleware, AuthExtractor, AuthMiddlewareError, AuthMiddlewareState};
