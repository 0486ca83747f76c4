//! LMDB-backed state store.
//!
//! Uses the heed crate (Rust bindings for LMDB) to keep the gate's daily
//! entries on disk, so counters and caches survive a restart of the
//! dashboard the same way browser local storage survives a reload.
//!
//! # Transactions
//!
//! - Read transactions for `get` and prefix scans
//! - One write transaction per `set` or `remove`, committed before return

use std::path::Path;

use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::traits::StateStore;

/// Durable state store in a single unnamed LMDB database.
pub struct LmdbStateStore {
    env: Env,
    db: Database<Str, Str>,
}

impl LmdbStateStore {
    /// Open or create a store.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory where LMDB files will be stored
    /// * `max_size_mb` - Maximum size of the database in megabytes
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the LMDB
    /// environment or database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, max_size_mb: usize) -> StorageResult<Self> {
        std::fs::create_dir_all(&path)?;

        // SAFETY: the environment is opened once per directory by this process.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(max_size_mb * 1024 * 1024)
                .max_dbs(1)
                .open(path.as_ref())
        }
        .map_err(|e| StorageError::EnvOpen(e.to_string()))?;

        let mut wtxn = env
            .write_txn()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let db: Database<Str, Str> = env
            .create_database(&mut wtxn, None)
            .map_err(|e| StorageError::DbOpen(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        debug!(path = %path.as_ref().display(), max_size_mb, "opened LMDB state store");

        Ok(Self { env, db })
    }
}

impl StateStore for LmdbStateStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let value = self
            .db
            .get(&rtxn, key)
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        Ok(value.map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        self.db
            .put(&mut wtxn, key, value)
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut wtxn = self
            .env
            .write_txn()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let deleted = self
            .db
            .delete(&mut wtxn, key)
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        wtxn.commit()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        Ok(deleted)
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let rtxn = self
            .env
            .read_txn()
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let iter = self
            .db
            .iter(&rtxn)
            .map_err(|e| StorageError::Transaction(e.to_string()))?;

        let mut keys = Vec::new();
        for result in iter {
            let (key, _) = result.map_err(|e| StorageError::Transaction(e.to_string()))?;
            if key.starts_with(prefix) {
                keys.push(key.to_string());
            }
        }

        Ok(keys)
    }
}
