//! Agilix API
//!
//! Axum server exposing the contacts list to the dashboard:
//! - `GET /api/contacts`: every row of the contacts CSV as JSON (JWT required)
//! - `/health/*`: liveness endpoints (public)
//! - `/openapi.json`: OpenAPI document

pub mod auth;
pub mod config;
pub mod contacts;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod telemetry;

pub use auth::{generate_jwt_token, validate_jwt_token, AuthConfig, AuthContext, Claims, JwtSecret};
pub use config::ApiConfig;
pub use contacts::{read_contacts, ContactsError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
