//! Per-user, per-day key namespace.
//!
//! Every gate entry is keyed `{prefix}_{user_id}_{YYYY-MM-DD}`. A
//! `DailyKey` cannot be built without a [`UserId`], so the store is never
//! addressed for an anonymous session.
//!
//! # Format
//!
//! | kind | prefix |
//! |---|---|
//! | view count | `contacts_view_count` |
//! | cached records | `contacts_cache` |
//! | limit flag | `limit_reached` |
//!
//! The date is always the last ten characters, so user ids containing `_`
//! still decode unambiguously.

use agilix_core::UserId;
use chrono::NaiveDate;

/// Date layout used in keys.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the three daily entries a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    ViewCount,
    Cache,
    LimitReached,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::ViewCount, EntryKind::Cache, EntryKind::LimitReached];

    pub fn prefix(self) -> &'static str {
        match self {
            EntryKind::ViewCount => "contacts_view_count",
            EntryKind::Cache => "contacts_cache",
            EntryKind::LimitReached => "limit_reached",
        }
    }
}

/// A fully scoped store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DailyKey {
    inner: DailyKeyInner,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DailyKeyInner {
    kind: EntryKind,
    user_id: UserId,
    date: NaiveDate,
}

impl DailyKey {
    pub fn new(kind: EntryKind, user_id: &UserId, date: NaiveDate) -> Self {
        Self {
            inner: DailyKeyInner {
                kind,
                user_id: user_id.clone(),
                date,
            },
        }
    }

    pub fn kind(&self) -> EntryKind {
        self.inner.kind
    }

    pub fn user_id(&self) -> &UserId {
        &self.inner.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.inner.date
    }

    /// Encode to the string stored in the [`StateStore`](crate::StateStore).
    pub fn encode(&self) -> String {
        format!(
            "{}_{}_{}",
            self.inner.kind.prefix(),
            self.inner.user_id,
            self.inner.date.format(DATE_FORMAT)
        )
    }

    /// Decode a stored key.
    ///
    /// Returns `None` if the prefix is unknown, the user id is blank, or the
    /// trailing date does not parse.
    pub fn decode(raw: &str) -> Option<Self> {
        let (kind, rest) = EntryKind::ALL.iter().find_map(|kind| {
            raw.strip_prefix(kind.prefix())
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| (*kind, rest))
        })?;

        let (user, date) = rest.rsplit_once('_')?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
        let user_id = UserId::new(user)?;

        Some(Self {
            inner: DailyKeyInner {
                kind,
                user_id,
                date,
            },
        })
    }

    /// Prefix matching every date of one entry kind for one user.
    ///
    /// The prefix also matches users whose id extends this one past an `_`,
    /// so callers scanning by prefix must [`decode`](Self::decode) and compare.
    pub fn user_prefix(kind: EntryKind, user_id: &UserId) -> String {
        format!("{}_{}_", kind.prefix(), user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(raw: &str) -> UserId {
        UserId::new(raw).expect("test user id is not blank")
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn test_encode_matches_storage_layout() {
        let u = user("user_2abc");
        let date = day(2024, 1, 5);
        assert_eq!(
            DailyKey::new(EntryKind::ViewCount, &u, date).encode(),
            "contacts_view_count_user_2abc_2024-01-05"
        );
        assert_eq!(
            DailyKey::new(EntryKind::Cache, &u, date).encode(),
            "contacts_cache_user_2abc_2024-01-05"
        );
        assert_eq!(
            DailyKey::new(EntryKind::LimitReached, &u, date).encode(),
            "limit_reached_user_2abc_2024-01-05"
        );
    }

    #[test]
    fn test_decode_handles_underscored_user_ids() {
        let decoded = DailyKey::decode("contacts_cache_user_2abc_2024-01-05");
        let decoded = decoded.expect("key should decode");
        assert_eq!(decoded.kind(), EntryKind::Cache);
        assert_eq!(decoded.user_id().as_str(), "user_2abc");
        assert_eq!(decoded.date(), day(2024, 1, 5));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(DailyKey::decode("contacts_cache_u1_yesterday").is_none());
        assert!(DailyKey::decode("something_else_u1_2024-01-05").is_none());
        assert!(DailyKey::decode("contacts_cache__2024-01-05").is_none());
        assert!(DailyKey::decode("contacts_cache").is_none());
    }

    #[test]
    fn test_user_prefix() {
        assert_eq!(
            DailyKey::user_prefix(EntryKind::LimitReached, &user("u1")),
            "limit_reached_u1_"
        );
    }
}
