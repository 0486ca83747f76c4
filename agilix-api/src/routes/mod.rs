//! REST API Routes
//!
//! - `/api/contacts` - contact list (auth required)
//! - `/health/*` - liveness checks (public)
//! - `/openapi.json` - OpenAPI document (public)

pub mod contacts;
pub mod health;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::auth::AuthConfig;
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::middleware::{auth_middleware, AuthMiddlewareState};
use crate::openapi::ApiDoc;

pub use contacts::create_router as contacts_router;
pub use health::create_router as health_router;

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

fn is_production_environment() -> bool {
    std::env::var("AGILIX_ENVIRONMENT")
        .map(|e| matches!(e.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

fn validate_api_config_for_production(config: &ApiConfig) -> ApiResult<()> {
    if config.cors_origins.is_empty() {
        return Err(ApiError::invalid_input(
            "CORS origins not configured for production. Set AGILIX_CORS_ORIGINS.",
        ));
    }
    Ok(())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins, `*.domain` wildcards
/// included.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(origins = ?config.cors_origins, "CORS: allowing configured origins");
        let config = config.clone();
        cors.allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts| {
                origin
                    .to_str()
                    .map(|o| config.is_origin_allowed(o))
                    .unwrap_or(false)
            },
        ))
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// # Middleware Order (outer to inner)
/// 1. CORS - handles preflight requests
/// 2. Trace - request spans
/// 3. Auth (only on /api/contacts) - validates the bearer token
///
/// In production (`AGILIX_ENVIRONMENT=production`) the JWT secret and CORS
/// origins are validated first.
pub fn create_api_router(api_config: &ApiConfig, auth_config: AuthConfig) -> ApiResult<Router> {
    if is_production_environment() {
        auth_config.validate_for_production()?;
        validate_api_config_for_production(api_config)?;
    }

    let auth_state = AuthMiddlewareState::new(auth_config);
    let contacts = contacts::create_router(contacts::ContactsState::new(api_config.contacts_path()))
        .layer(from_fn_with_state(auth_state, auth_middleware));

    Ok(Router::new()
        .nest("/api/contacts", contacts)
        .nest("/health", health::create_router())
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(api_config)))
}
