//! Wall-clock abstraction.
//!
//! The gate derives "today" from the clock on every access, so tests inject a
//! [`FixedClock`] to pin or advance the date deterministically.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for deterministic tests.
///
/// Holds Unix epoch seconds. Interior mutability lets a test roll the date
/// over while the gate holds a shared reference.
#[derive(Debug, Default)]
pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(epoch_secs: i64) -> Self {
        Self(AtomicI64::new(epoch_secs))
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::new(instant.timestamp())
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.0.store(instant.timestamp(), Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        // Out-of-range values fall back to the epoch.
        Utc.timestamp_opt(self.0.load(Ordering::SeqCst), 0)
            .single()
            .unwrap_or_default()
    }
}
