//! In-memory state store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::StateStore;

/// Process-local store. Contents vanish when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateStore for InMemoryStateStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut entries = self.entries.write().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get("a")?, None);

        store.set("a", "1")?;
        store.set("a", "2")?;
        assert_eq!(store.get("a")?.as_deref(), Some("2"));
        assert_eq!(store.len(), 1);

        assert!(store.remove("a")?);
        assert!(!store.remove("a")?);
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn test_keys_with_prefix_is_sorted_and_bounded() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        store.set("contacts_cache_u1_2024-01-02", "[]")?;
        store.set("contacts_cache_u1_2024-01-01", "[]")?;
        store.set("contacts_cache_u2_2024-01-01", "[]")?;
        store.set("limit_reached_u1_2024-01-01", "true")?;

        let keys = store.keys_with_prefix("contacts_cache_u1_")?;
        assert_eq!(
            keys,
            vec![
                "contacts_cache_u1_2024-01-01".to_string(),
                "contacts_cache_u1_2024-01-02".to_string(),
            ]
        );
        Ok(())
    }
}
