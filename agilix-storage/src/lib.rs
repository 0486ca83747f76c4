//! Agilix Storage
//!
//! Key-value persistence for the daily view gate.
//!
//! - [`StateStore`]: the string key/value seam the gate is written against
//! - [`InMemoryStateStore`]: process-local store for tests and ephemeral sessions
//! - [`LmdbStateStore`]: durable store backed by LMDB via `heed`
//! - [`DailyKey`]: the per-user, per-day key namespace

pub mod daily_key;
pub mod error;
pub mod lmdb;
pub mod memory;
pub mod traits;

pub use daily_key::{DailyKey, EntryKind};
pub use error::{StorageError, StorageResult};
pub use lmdb::LmdbStateStore;
pub use memory::InMemoryStateStore;
pub use traits::StateStore;
