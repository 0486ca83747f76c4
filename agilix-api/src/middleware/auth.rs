//! Axum Middleware for Authentication
//!
//! Authenticates requests by Bearer JWT, injects the resulting
//! `AuthContext` into request extensions, and answers 401 otherwise.

use crate::auth::{authenticate, AuthConfig, AuthContext};
use crate::error::ApiError;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

// ============================================================================
// MIDDLEWARE STATE
// ============================================================================

/// Shared state for authentication middleware.
#[derive(Debug, Clone)]
pub struct AuthMiddlewareState {
    pub auth_config: Arc<AuthConfig>,
}

impl AuthMiddlewareState {
    pub fn new(auth_config: AuthConfig) -> Self {
        Self {
            auth_config: Arc::new(auth_config),
        }
    }
}

// ============================================================================
// MIDDLEWARE
// ============================================================================

/// Authentication middleware.
///
/// Validates the `Authorization: Bearer <jwt>` header and stores the
/// caller's [`AuthContext`] for handlers to extract.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthMiddlewareError> {
    let auth_header = request
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    let auth_context = authenticate(&state.auth_config, auth_header).map_err(|e| {
        tracing::debug!(code = %e.code, "rejected unauthenticated request");
        AuthMiddlewareError(e)
    })?;

    request.extensions_mut().insert(auth_context);

    Ok(next.run(request).await)
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Error wrapper for middleware that implements IntoResponse.
#[derive(Debug)]
pub struct AuthMiddlewareError(pub ApiError);

impl IntoResponse for AuthMiddlewareError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

// ============================================================================
// TYPED EXTRACTOR
// ============================================================================

/// Typed Axum extractor for authentication context.
///
/// `auth_middleware` must run on the route; without it the extractor
/// answers 500.
#[derive(Debug, Clone)]
pub struct AuthExtractor(pub AuthContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthExtractor
where
    S: Send + Sync,
{
    type Rejection = AuthMiddlewareError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(AuthExtractor)
            .ok_or_else(|| {
                AuthMiddlewareError(ApiError::internal_error(
                    "AuthContext not found in request extensions. \
                     Ensure auth_middleware is applied to this route.",
                ))
            })
    }
}

impl std::ops::Deref for AuthExtractor {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt_token, test_clocks, JwtSecret};
    use agilix_core::UserId;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn test_auth_config() -> AuthConfig {
        let secret = JwtSecret::new("test_secret".to_string()).expect("test secret should be valid");
        AuthConfig::with_secret(secret, Arc::new(test_clocks::valid()))
    }

    fn test_app() -> Router {
        let auth_state = AuthMiddlewareState::new(test_auth_config());

        Router::new()
            .route(
                "/whoami",
                get(|AuthExtractor(auth): AuthExtractor| async move { auth.user_id.to_string() }),
            )
            .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
    }

    #[tokio::test]
    async fn test_middleware_with_valid_token() -> Result<(), String> {
        let user = UserId::new("user_2abc").ok_or("blank user")?;
        let token = generate_jwt_token(&test_auth_config(), &user).map_err(|e| e.to_string())?;

        let request = Request::builder()
            .uri("/whoami")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = test_app()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| e.to_string())?;
        assert_eq!(&body[..], b"user_2abc");
        Ok(())
    }

    #[tokio::test]
    async fn test_middleware_without_header() -> Result<(), String> {
        let request = Request::builder()
            .uri("/whoami")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = test_app()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }

    #[tokio::test]
    async fn test_middleware_with_garbage_token() -> Result<(), String> {
        let request = Request::builder()
            .uri("/whoami")
            .header("authorization", "Bearer not.a.jwt")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = test_app()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
