//! Error types for the dashboard.

use crate::api_client::ApiClientError;
use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error(transparent)]
    Gate(#[from] agilix_gate::GateError),
    #[error(transparent)]
    Storage(#[from] agilix_storage::StorageError),
    #[error("Failed to init logging: {0}")]
    Logging(String),
}
