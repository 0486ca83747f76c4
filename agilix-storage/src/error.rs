//! Storage errors.

/// Error type for state store operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to open or create the LMDB environment.
    #[error("Failed to open LMDB environment: {0}")]
    EnvOpen(String),

    /// Failed to open the database within the environment.
    #[error("Failed to open database: {0}")]
    DbOpen(String),

    /// Transaction error.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// A value could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for state store operations.
pub type StorageResult<T> = Result<T, StorageError>;
