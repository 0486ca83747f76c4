//! The daily view gate.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use agilix_core::{Clock, ContactProvider, ContactRecord, GateConfig, SystemClock, UserId};
use agilix_storage::{DailyKey, EntryKind, StateStore};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{GateError, GateResult};
use crate::state::DailyViewState;

/// Where `load_or_fetch` got its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    Cache,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<ContactRecord>,
    pub source: RecordSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Previous,
}

/// Outcome of a pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageResult {
    /// Move to this page.
    Advance(usize),
    /// Below page 1. Nothing changed.
    Blocked,
    /// Past the daily cap. The visible page must not change.
    LimitReached,
}

/// Today's UTC date according to `clock`.
pub fn today_key(clock: &dyn Clock) -> NaiveDate {
    clock.now().date_naive()
}

/// Resolve the identity provider's user id, or [`GateError::NotReady`].
pub fn ready_user(raw: Option<&str>) -> GateResult<UserId> {
    raw.and_then(UserId::new).ok_or(GateError::NotReady)
}

type FetchSlot = (UserId, NaiveDate);

/// Per-user, per-day contact view limit with a same-day record cache.
///
/// The gate holds no state of its own beyond the in-flight fetch set. Every
/// call reads what it needs from the store, so "today" rolls over the moment
/// the clock crosses UTC midnight.
pub struct DailyViewGate {
    store: Arc<dyn StateStore>,
    provider: Arc<dyn ContactProvider>,
    clock: Arc<dyn Clock>,
    config: GateConfig,
    in_flight: Mutex<HashSet<FetchSlot>>,
}

impl DailyViewGate {
    /// Build a gate on the system clock.
    ///
    /// # Errors
    /// Returns [`GateError::Config`] if `config` fails validation.
    pub fn new(
        store: Arc<dyn StateStore>,
        provider: Arc<dyn ContactProvider>,
        config: GateConfig,
    ) -> GateResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            provider,
            clock: Arc::new(SystemClock),
            config,
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Today's UTC date, read fresh from the clock.
    pub fn today_key(&self) -> NaiveDate {
        today_key(self.clock.as_ref())
    }

    /// Current persisted state for `user_id` on `date`, as stored.
    pub fn snapshot(&self, user_id: &UserId, date: NaiveDate) -> GateResult<DailyViewState> {
        Ok(DailyViewState::load(self.store.as_ref(), user_id, date)?)
    }

    /// Serve today's records from cache, or fetch them once.
    ///
    /// An oversized view counter is clamped first, whichever path follows.
    /// A non-empty cache is trimmed to the cap and returned without touching
    /// the provider. Otherwise the provider is called once and its first
    /// `daily_limit` records become the cache. A failed fetch writes no cache.
    ///
    /// # Errors
    /// - [`GateError::InFlight`] if a fetch for the same user and day is outstanding
    /// - [`GateError::Fetch`] if the provider fails
    /// - [`GateError::Storage`] if the store fails
    pub async fn load_or_fetch(&self, user_id: &UserId, today: NaiveDate) -> GateResult<LoadOutcome> {
        let mut state = DailyViewState::load(self.store.as_ref(), user_id, today)?;
        self.clamp_view_count(&mut state)?;

        if !state.cached_records.is_empty() {
            let records = self.trim_cache(state)?;
            debug!(user_id = %user_id, date = %today, count = records.len(), "serving contacts from cache");
            return Ok(LoadOutcome {
                records,
                source: RecordSource::Cache,
            });
        }

        let _slot = InFlightSlot::claim(&self.in_flight, user_id, today)?;

        info!(user_id = %user_id, date = %today, "fetching contacts");
        let mut records = self.provider.fetch_contacts().await.map_err(|e| {
            warn!(user_id = %user_id, date = %today, error = %e, "contact fetch failed");
            GateError::Fetch(e)
        })?;

        let fetched = records.len();
        records.truncate(self.config.daily_limit);

        state.cached_records = records;
        state.save_records(self.store.as_ref())?;

        info!(
            user_id = %user_id,
            date = %today,
            fetched,
            cached = state.cached_records.len(),
            "cached contacts for the day"
        );

        Ok(LoadOutcome {
            records: state.cached_records,
            source: RecordSource::Network,
        })
    }

    /// Decide whether moving from `current_page` in `direction` is allowed.
    pub fn request_page(
        &self,
        user_id: &UserId,
        current_page: usize,
        direction: PageDirection,
    ) -> GateResult<PageResult> {
        let target = match direction {
            PageDirection::Next => current_page.saturating_add(1),
            PageDirection::Previous => match current_page.checked_sub(1) {
                Some(page) => page,
                None => return Ok(PageResult::Blocked),
            },
        };
        self.goto_page(user_id, target)
    }

    /// Decide whether page `target` (1-based) may be shown.
    ///
    /// Past `max_page` the limit trips: the flag is set and the view count is
    /// forced to the cap for today. Repeating this is harmless.
    pub fn goto_page(&self, user_id: &UserId, target: usize) -> GateResult<PageResult> {
        if target > self.config.max_page() {
            self.mark_limit_reached(user_id, self.today_key())?;
            return Ok(PageResult::LimitReached);
        }
        if target < 1 {
            return Ok(PageResult::Blocked);
        }
        Ok(PageResult::Advance(target))
    }

    /// Remove this user's entries for every date except `today`.
    ///
    /// Never called implicitly. Returns the number of keys removed.
    pub fn purge_stale_entries(&self, user_id: &UserId, today: NaiveDate) -> GateResult<usize> {
        let mut removed = 0;
        for kind in EntryKind::ALL {
            let prefix = DailyKey::user_prefix(kind, user_id);
            for raw in self.store.keys_with_prefix(&prefix)? {
                let stale = DailyKey::decode(&raw)
                    .is_some_and(|key| key.user_id() == user_id && key.date() != today);
                if stale && self.store.remove(&raw)? {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            info!(user_id = %user_id, date = %today, removed, "purged stale daily entries");
        }
        Ok(removed)
    }

    fn mark_limit_reached(&self, user_id: &UserId, today: NaiveDate) -> GateResult<()> {
        let mut state = DailyViewState::load(self.store.as_ref(), user_id, today)?;
        if !state.limit_reached {
            info!(user_id = %user_id, date = %today, limit = self.config.daily_limit, "daily view limit reached");
        }
        state.limit_reached = true;
        state.view_count = self.config.daily_limit;
        state.save_limit_reached(self.store.as_ref())?;
        state.save_view_count(self.store.as_ref())?;
        Ok(())
    }

    /// Trim an over-cap cache and persist the repair.
    fn trim_cache(&self, mut state: DailyViewState) -> GateResult<Vec<ContactRecord>> {
        let cap = self.config.daily_limit;
        if state.cached_records.len() > cap {
            warn!(
                user_id = %state.user_id,
                date = %state.date,
                found = state.cached_records.len(),
                cap,
                "trimming oversized contacts cache"
            );
            state.cached_records.truncate(cap);
            state.save_records(self.store.as_ref())?;
        }
        Ok(state.cached_records)
    }

    /// Clamp an over-cap view counter and persist the repair.
    fn clamp_view_count(&self, state: &mut DailyViewState) -> GateResult<()> {
        let cap = self.config.daily_limit;
        if state.view_count > cap {
            warn!(
                user_id = %state.user_id,
                date = %state.date,
                found = state.view_count,
                cap,
                "clamping view count"
            );
            state.view_count = cap;
            state.save_view_count(self.store.as_ref())?;
        }
        Ok(())
    }
}

/// Marks a (user, day) fetch as outstanding until dropped.
struct InFlightSlot<'a> {
    set: &'a Mutex<HashSet<FetchSlot>>,
    slot: FetchSlot,
}

impl<'a> InFlightSlot<'a> {
    fn claim(set: &'a Mutex<HashSet<FetchSlot>>, user_id: &UserId, date: NaiveDate) -> GateResult<Self> {
        let slot = (user_id.clone(), date);
        let mut guard = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !guard.insert(slot.clone()) {
            return Err(GateError::InFlight {
                user_id: user_id.to_string(),
                date,
            });
        }
        Ok(Self { set, slot })
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut guard = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        guard.remove(&self.slot);
    }
}
