//! Agilix Core - Shared Types
//!
//! Data types shared by every Agilix crate: contact records, user identity,
//! gate configuration, the clock abstraction, and the contact provider seam.
//! This crate holds no storage or HTTP code.

pub mod clock;
pub mod config;
pub mod contact;
pub mod error;
pub mod identity;
pub mod provider;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::GateConfig;
pub use contact::{
    format_field_label, ContactRecord, DISPLAY_COLUMNS, EXCLUDE_COLUMNS, MISSING_VALUE,
};
pub use error::{AgilixError, AgilixResult, ConfigError, ProviderError};
pub use identity::UserId;
pub use provider::ContactProvider;
