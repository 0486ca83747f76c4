//! Agilix Test Utilities
//!
//! Shared test infrastructure for the Agilix workspace:
//! - Mock contact provider with call counting and failure injection
//! - Contact and clock fixtures
//! - Proptest generators for records and user ids

pub use agilix_core::{
    Clock, ContactProvider, ContactRecord, FixedClock, GateConfig, ProviderError, UserId,
};
pub use agilix_storage::{InMemoryStateStore, StateStore};

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

// ============================================================================
// MOCK PROVIDER
// ============================================================================

/// Mock contact provider for testing (async).
///
/// Serves a fixed record list, counts calls, and fails on demand.
#[derive(Debug, Default)]
pub struct MockContactProvider {
    records: Mutex<Vec<ContactRecord>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockContactProvider {
    pub fn new(records: Vec<ContactRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// A provider whose every call fails with HTTP 500.
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.set_failing(true);
        provider
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_records(&self, records: Vec<ContactRecord>) {
        if let Ok(mut guard) = self.records.lock() {
            *guard = records;
        }
    }

    /// Number of `fetch_contacts` calls so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactProvider for MockContactProvider {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::RequestFailed {
                status: 500,
                message: "Failed to fetch contacts".to_string(),
            });
        }
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| ProviderError::Transport {
                reason: "mock provider lock poisoned".to_string(),
            })
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Agilix types.

    use super::*;
    use proptest::prelude::*;

    pub fn arb_user_id() -> impl Strategy<Value = UserId> {
        "user_[a-zA-Z0-9]{1,16}".prop_filter_map("non-blank id", UserId::new)
    }

    /// A record with 1-6 lowercase snake_case fields and printable values.
    pub fn arb_contact_record() -> impl Strategy<Value = ContactRecord> {
        proptest::collection::vec(("[a-z][a-z_]{0,11}", "[ -~]{0,24}"), 1..6)
            .prop_map(|fields| fields.into_iter().collect())
    }

    pub fn arb_contacts(max: usize) -> impl Strategy<Value = Vec<ContactRecord>> {
        proptest::collection::vec(arb_contact_record(), 0..=max)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    /// A contact with the full CSV column set, numbered for order checks.
    pub fn sample_contact(index: usize) -> ContactRecord {
        [
            ("first_name", format!("First{index}")),
            ("last_name", format!("Last{index}")),
            ("email", format!("contact{index}@agency.example")),
            ("phone", format!("555-01{:02}", index % 100)),
            ("title", if index % 2 == 0 { "Director".to_string() } else { "Manager".to_string() }),
            ("agency_name", format!("Agency {}", index % 7)),
            ("email_type", "work".to_string()),
            ("contact_form_url", String::new()),
            ("created_at", "2024-01-01".to_string()),
            ("updated_at", "2024-01-02".to_string()),
        ]
        .into_iter()
        .collect()
    }

    /// `count` numbered contacts, `sample_contact(0)` first.
    pub fn sample_contacts(count: usize) -> Vec<ContactRecord> {
        (0..count).map(sample_contact).collect()
    }

    pub fn test_user() -> UserId {
        UserId::new("user_test").expect("fixture user id is not blank")
    }

    /// 2024-01-01 12:00:00 UTC.
    pub fn midday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
            .single()
            .expect("fixture timestamp is valid")
    }

    /// Clock pinned at [`midday`].
    pub fn midday_clock() -> FixedClock {
        FixedClock::at(midday())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_sample_contacts_are_numbered_in_order() {
        let contacts = sample_contacts(3);
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[0].get("first_name"), Some("First0"));
        assert_eq!(contacts[2].get("email"), Some("contact2@agency.example"));
    }

    #[test]
    fn test_mock_provider_starts_idle() {
        let provider = MockContactProvider::new(sample_contacts(2));
        assert_eq!(provider.calls(), 0);
        assert!(!provider.failing.load(Ordering::SeqCst));
        assert!(MockContactProvider::failing().failing.load(Ordering::SeqCst));
    }
}
