//! Error types for Agilix operations

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Contact provider errors.
///
/// Any of these is a fetch failure from the gate's point of view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Transport error: {reason}")]
    Transport { reason: String },

    #[error("Invalid response: {reason}")]
    InvalidResponse { reason: String },
}

/// Master error type for core operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgilixError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Result type alias for core operations.
pub type AgilixResult<T> = Result<T, AgilixError>;
