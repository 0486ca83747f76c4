//! Typed view of a user's persisted daily entries.
//!
//! The store holds three independent strings per (user, day). This module is
//! the only place that parses or formats them. Anything that fails to parse
//! is logged and read as its default, so corrupt local state can never stop
//! the dashboard from loading.

use agilix_core::{ContactRecord, UserId};
use agilix_storage::{DailyKey, EntryKind, StateStore, StorageError, StorageResult};
use chrono::NaiveDate;
use tracing::warn;

/// Stored value of a tripped limit flag.
const LIMIT_FLAG_SET: &str = "true";

/// Everything the gate knows about one user on one UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyViewState {
    pub date: NaiveDate,
    pub user_id: UserId,
    pub cached_records: Vec<ContactRecord>,
    pub view_count: usize,
    pub limit_reached: bool,
}

impl DailyViewState {
    /// Empty state for a day with nothing stored.
    pub fn empty(user_id: &UserId, date: NaiveDate) -> Self {
        Self {
            date,
            user_id: user_id.clone(),
            cached_records: Vec::new(),
            view_count: 0,
            limit_reached: false,
        }
    }

    /// Read all three entries. Values are returned as stored, not clamped.
    pub fn load(store: &dyn StateStore, user_id: &UserId, date: NaiveDate) -> StorageResult<Self> {
        let key = |kind| DailyKey::new(kind, user_id, date).encode();

        let cached_records = match store.get(&key(EntryKind::Cache))? {
            Some(raw) => parse_records(&raw, user_id, date),
            None => Vec::new(),
        };
        let view_count = match store.get(&key(EntryKind::ViewCount))? {
            Some(raw) => parse_count(&raw, user_id, date),
            None => 0,
        };
        let limit_reached = match store.get(&key(EntryKind::LimitReached))? {
            Some(raw) => parse_flag(&raw, user_id, date),
            None => false,
        };

        Ok(Self {
            date,
            user_id: user_id.clone(),
            cached_records,
            view_count,
            limit_reached,
        })
    }

    /// Persist `cached_records` as a JSON array.
    pub fn save_records(&self, store: &dyn StateStore) -> StorageResult<()> {
        let encoded = serde_json::to_string(&self.cached_records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.set(&self.key(EntryKind::Cache), &encoded)
    }

    pub fn save_view_count(&self, store: &dyn StateStore) -> StorageResult<()> {
        store.set(&self.key(EntryKind::ViewCount), &self.view_count.to_string())
    }

    /// Persist the limit flag. A cleared flag is stored as absence.
    pub fn save_limit_reached(&self, store: &dyn StateStore) -> StorageResult<()> {
        let key = self.key(EntryKind::LimitReached);
        if self.limit_reached {
            store.set(&key, LIMIT_FLAG_SET)
        } else {
            store.remove(&key).map(|_| ())
        }
    }

    fn key(&self, kind: EntryKind) -> String {
        DailyKey::new(kind, &self.user_id, self.date).encode()
    }
}

fn parse_records(raw: &str, user_id: &UserId, date: NaiveDate) -> Vec<ContactRecord> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(user_id = %user_id, %date, error = %e, "discarding malformed contacts cache");
        Vec::new()
    })
}

fn parse_count(raw: &str, user_id: &UserId, date: NaiveDate) -> usize {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(user_id = %user_id, %date, value = raw, "discarding malformed view count");
        0
    })
}

fn parse_flag(raw: &str, user_id: &UserId, date: NaiveDate) -> bool {
    if raw == LIMIT_FLAG_SET {
        return true;
    }
    warn!(user_id = %user_id, %date, value = raw, "discarding malformed limit flag");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use agilix_storage::InMemoryStateStore;
    use agilix_test_utils::fixtures::{sample_contacts, test_user};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid test date")
    }

    #[test]
    fn test_absent_entries_load_as_defaults() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        let state = DailyViewState::load(&store, &test_user(), day())?;
        assert_eq!(state, DailyViewState::empty(&test_user(), day()));
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        let mut state = DailyViewState::empty(&test_user(), day());
        state.cached_records = sample_contacts(3);
        state.view_count = 30;
        state.limit_reached = true;
        state.save_records(&store)?;
        state.save_view_count(&store)?;
        state.save_limit_reached(&store)?;

        assert_eq!(
            store.get("contacts_view_count_user_test_2024-01-01")?.as_deref(),
            Some("30")
        );
        assert_eq!(
            store.get("limit_reached_user_test_2024-01-01")?.as_deref(),
            Some("true")
        );
        assert_eq!(DailyViewState::load(&store, &test_user(), day())?, state);
        Ok(())
    }

    #[test]
    fn test_records_are_stored_as_ordered_json_array() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        let mut state = DailyViewState::empty(&test_user(), day());
        state.cached_records = sample_contacts(2);
        state.save_records(&store)?;

        let raw = store
            .get("contacts_cache_user_test_2024-01-01")?
            .expect("cache entry written");
        assert!(raw.starts_with(r#"[{"first_name":"First0""#));
        assert_eq!(
            serde_json::from_str::<Vec<ContactRecord>>(&raw).ok(),
            Some(sample_contacts(2))
        );
        Ok(())
    }

    #[test]
    fn test_serialization_error_is_a_storage_error() {
        let err = StorageError::Serialization("bad value".to_string());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn test_malformed_entries_default_instead_of_failing() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        store.set("contacts_cache_user_test_2024-01-01", "{not json")?;
        store.set("contacts_view_count_user_test_2024-01-01", "lots")?;
        store.set("limit_reached_user_test_2024-01-01", "yes")?;

        let state = DailyViewState::load(&store, &test_user(), day())?;
        assert!(state.cached_records.is_empty());
        assert_eq!(state.view_count, 0);
        assert!(!state.limit_reached);
        Ok(())
    }

    #[test]
    fn test_negative_count_is_malformed() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        store.set("contacts_view_count_user_test_2024-01-01", "-4")?;
        assert_eq!(DailyViewState::load(&store, &test_user(), day())?.view_count, 0);
        Ok(())
    }

    #[test]
    fn test_non_string_field_values_are_malformed() -> StorageResult<()> {
        let store = InMemoryStateStore::new();
        store.set("contacts_cache_user_test_2024-01-01", r#"[{"first_name": 7}]"#)?;
        assert!(DailyViewState::load(&store, &test_user(), day())?
            .cached_records
            .is_empty());
        Ok(())
    }
}
