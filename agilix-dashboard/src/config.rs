//! Configuration loading for the Agilix dashboard.
//!
//! All fields are required unless explicitly marked optional. The `[gate]`
//! table may be omitted, in which case the product limits apply.

use agilix_core::GateConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub user_id: String,
    /// Bearer JWT sent to the contacts API. Optional.
    pub auth_token: Option<String>,
    pub request_timeout_ms: u64,
    /// LMDB directory for daily state. Optional; state is in-memory when absent.
    pub state_path: Option<PathBuf>,
    pub state_max_size_mb: usize,
    pub log_level: String,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or AGILIX_DASHBOARD_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl DashboardConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_string(),
            });
        }
        if self.user_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.auth_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "auth_token",
                reason: "must not be empty when present".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self
            .state_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                field: "state_path",
                reason: "must not be empty when present".to_string(),
            });
        }
        if self.state_max_size_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "state_max_size_mb",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_level",
                reason: "must not be empty".to_string(),
            });
        }
        self.gate.validate().map_err(|e| ConfigError::InvalidValue {
            field: "gate",
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("AGILIX_DASHBOARD_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
