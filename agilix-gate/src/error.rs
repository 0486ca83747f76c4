//! Gate errors.
//!
//! Only fetch failures are meant for the user. Malformed or oversized
//! persisted state never shows up here; the gate repairs it in place.

use agilix_core::{ConfigError, ProviderError};
use agilix_storage::StorageError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// No user id yet; the identity provider has not finished loading.
    #[error("User session is not ready")]
    NotReady,

    /// A fetch for this user and day is already outstanding.
    #[error("A contact fetch for {user_id} on {date} is already in flight")]
    InFlight { user_id: String, date: NaiveDate },

    #[error("Failed to fetch contacts: {0}")]
    Fetch(#[from] ProviderError),

    #[error("State store error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid gate configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type GateResult<T> = Result<T, GateError>;
