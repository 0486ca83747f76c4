//! API Configuration Module
//!
//! Bind address, contact data location, and CORS settings. Loaded from
//! environment variables with defaults suited to local development.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{ApiError, ApiResult};

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind.
    pub bind_host: String,

    /// Port to bind.
    pub port: u16,

    /// Directory holding the contact data files.
    pub data_dir: PathBuf,

    /// Contacts CSV file name inside `data_dir`.
    pub contacts_file: String,

    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "https://agilix.io,https://app.agilix.io"
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            contacts_file: "contacts.csv".to_string(),
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `AGILIX_API_BIND`: Host to bind (default: 0.0.0.0)
    /// - `PORT` / `AGILIX_API_PORT`: Port to bind (default: 3000)
    /// - `AGILIX_DATA_DIR`: Data directory (default: data)
    /// - `AGILIX_CONTACTS_FILE`: Contacts CSV name (default: contacts.csv)
    /// - `AGILIX_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `AGILIX_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    ///
    /// # Errors
    /// Returns `InvalidInput` if the port is not a valid `u16`.
    pub fn from_env() -> ApiResult<Self> {
        let defaults = Self::default();

        let port = match std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("AGILIX_API_PORT").ok())
        {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", raw)))?,
            None => defaults.port,
        };

        let cors_origins = std::env::var("AGILIX_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind_host: std::env::var("AGILIX_API_BIND").unwrap_or(defaults.bind_host),
            port,
            data_dir: std::env::var("AGILIX_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            contacts_file: std::env::var("AGILIX_CONTACTS_FILE").unwrap_or(defaults.contacts_file),
            cors_origins,
            cors_max_age_secs: std::env::var("AGILIX_CORS_MAX_AGE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.cors_max_age_secs),
        })
    }

    /// Full path of the contacts CSV.
    pub fn contacts_path(&self) -> PathBuf {
        self.data_dir.join(&self.contacts_file)
    }

    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }

        self.cors_origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // Wildcard subdomains: *.agilix.io
            if let Some(pattern) = allowed.strip_prefix("*.") {
                if let Some(origin_domain) = origin.strip_prefix("https://") {
                    return origin_domain
                        .strip_suffix(pattern)
                        .is_some_and(|sub| sub.ends_with('.'))
                        || origin_domain == pattern;
                }
            }
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.port, 3000);
        assert_eq!(config.contacts_path(), PathBuf::from("data/contacts.csv"));
    }

    #[test]
    fn test_bind_addr() -> ApiResult<()> {
        let config = ApiConfig {
            bind_host: "127.0.0.1".to_string(),
            port: 8080,
            ..ApiConfig::default()
        };
        assert_eq!(config.bind_addr()?.to_string(), "127.0.0.1:8080");

        let bad = ApiConfig {
            bind_host: "not a host".to_string(),
            ..ApiConfig::default()
        };
        assert!(bad.bind_addr().is_err());
        Ok(())
    }

    #[test]
    fn test_origin_allowed_dev_mode() {
        let config = ApiConfig::default();
        assert!(config.is_origin_allowed("https://anything.com"));
        assert!(config.is_origin_allowed("http://localhost:3000"));
    }

    #[test]
    fn test_origin_allowed_production() {
        let config = ApiConfig {
            cors_origins: vec![
                "https://agilix.io".to_string(),
                "https://app.agilix.io".to_string(),
            ],
            ..ApiConfig::default()
        };

        assert!(config.is_origin_allowed("https://agilix.io"));
        assert!(config.is_origin_allowed("https://app.agilix.io"));
        assert!(!config.is_origin_allowed("https://evil.com"));
        assert!(!config.is_origin_allowed("https://notagilix.io"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        let config = ApiConfig {
            cors_origins: vec!["*.agilix.io".to_string()],
            ..ApiConfig::default()
        };

        assert!(config.is_origin_allowed("https://app.agilix.io"));
        assert!(config.is_origin_allowed("https://agilix.io"));
        assert!(!config.is_origin_allowed("https://evilagilix.io"));
        assert!(!config.is_origin_allowed("http://app.agilix.io"));
    }

    fn wildcard_config() -> ApiConfig {
        ApiConfig {
            cors_origins: vec!["*.agilix.io".to_string()],
            ..ApiConfig::default()
        }
    }

    proptest! {
        #[test]
        fn prop_dev_mode_allows_every_origin(origin in ".*") {
            prop_assert!(ApiConfig::default().is_origin_allowed(&origin));
        }

        #[test]
        fn prop_wildcard_matches_whole_labels_over_https(sub in "[a-z0-9]{1,12}") {
            let config = wildcard_config();
            let label_origin = format!("https://{}.agilix.io", sub);
            let fused_origin = format!("https://{}agilix.io", sub);
            let http_origin = format!("http://{}.agilix.io", sub);
            prop_assert!(config.is_origin_allowed(&label_origin));
            prop_assert!(!config.is_origin_allowed(&fused_origin));
            prop_assert!(!config.is_origin_allowed(&http_origin));
        }

        #[test]
        fn prop_unlisted_origin_is_rejected(host in "[a-z]{1,10}\\.example") {
            let config = ApiConfig {
                cors_origins: vec!["https://agilix.io".to_string()],
                ..ApiConfig::default()
            };
            let origin = format!("https://{}", host);
            prop_assert!(!config.is_origin_allowed(&origin));
        }
    }
}
