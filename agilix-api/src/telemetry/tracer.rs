//! Tracing Subscriber Initialization

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Filter directives used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: std::env::var("AGILIX_SERVICE_NAME")
                .unwrap_or_else(|_| "agilix-api".to_string()),
            environment: std::env::var("AGILIX_ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            default_filter: std::env::var("AGILIX_LOG_LEVEL")
                .unwrap_or_else(|_| "agilix_api=debug,tower_http=debug,info".to_string()),
        }
    }
}

/// Initialize the tracing subscriber with a JSON fmt layer.
///
/// Call once at startup. A second call fails with `InternalError` and
/// leaves the first subscriber installed.
pub fn init_tracer(config: &TelemetryConfig) -> ApiResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        environment = config.environment,
        "Telemetry initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EnvVarGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let original = std::env::var(key).ok();
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
            Self { key, original }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.original.as_deref() {
                Some(v) => std::env::set_var(self.key, v),
                None => std::env::remove_var(self.key),
            }
        }
    }

    #[test]
    fn test_telemetry_config_default() {
        let _name = EnvVarGuard::set("AGILIX_SERVICE_NAME", None);
        let _level = EnvVarGuard::set("AGILIX_LOG_LEVEL", None);
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "agilix-api");
        assert!(config.default_filter.contains("tower_http"));
    }

    #[test]
    fn test_second_init_is_an_error() {
        let config = TelemetryConfig {
            service_name: "test".to_string(),
            environment: "test".to_string(),
            default_filter: "warn".to_string(),
        };
        // The first call may already have happened in another test.
        let _ = init_tracer(&config);
        assert!(init_tracer(&config).is_err());
    }
}
