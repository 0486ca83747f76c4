//! Agilix contacts dashboard.
//!
//! Terminal client for the contacts API. Every load and page move goes
//! through the daily view gate, backed by LMDB when `state_path` is set.

pub mod api_client;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod telemetry;

use std::sync::Arc;

use agilix_gate::DailyViewGate;
use agilix_storage::{InMemoryStateStore, LmdbStateStore, StateStore};

use crate::api_client::RestClient;
use crate::config::DashboardConfig;
use crate::error::DashboardError;

/// Open the configured state store: LMDB at `state_path`, else in-memory.
pub fn open_state_store(config: &DashboardConfig) -> Result<Arc<dyn StateStore>, DashboardError> {
    match &config.state_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "opening LMDB state store");
            Ok(Arc::new(LmdbStateStore::open(path, config.state_max_size_mb)?))
        }
        None => {
            tracing::info!("no state_path configured; daily state will not survive restarts");
            Ok(Arc::new(InMemoryStateStore::new()))
        }
    }
}

/// Wire the REST client, state store, and gate from configuration.
pub fn build_gate(config: &DashboardConfig) -> Result<DailyViewGate, DashboardError> {
    let client = RestClient::new(config)?;
    let store = open_state_store(config)?;
    Ok(DailyViewGate::new(store, Arc::new(client), config.gate)?)
}
