//! Agilix API Server Entry Point
//!
//! Loads configuration from the environment and serves the contacts API
//! until Ctrl-C.

use axum::Router;

use agilix_api::telemetry::{init_tracer, TelemetryConfig};
use agilix_api::{create_api_router, ApiConfig, ApiError, ApiResult, AuthConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracer(&TelemetryConfig::default())?;

    let api_config = ApiConfig::from_env()?;
    let auth_config = AuthConfig::from_env();

    let contacts_path = api_config.contacts_path();
    if !contacts_path.exists() {
        tracing::warn!(path = %contacts_path.display(), "contacts file not found; requests will fail until it exists");
    }

    let app: Router = create_api_router(&api_config, auth_config)?;

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, "Starting Agilix API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
