//! Contacts page view model.
//!
//! Holds everything the renderer needs and routes every load and page move
//! through the [`DailyViewGate`]. Search and row selection are local.

use std::sync::Arc;

use agilix_core::{ContactRecord, UserId};
use agilix_gate::{filter, time_until_reset, DailyViewGate, GateError, PageDirection, PageResult, RecordSource};

/// Where the limit popup's upgrade button leads.
pub const UPGRADE_PATH: &str = "/upgrade";

const FETCH_FAILED: &str = "Failed to fetch contacts";

pub struct ContactsPage {
    gate: Arc<DailyViewGate>,
    user_id: UserId,

    pub records: Vec<ContactRecord>,
    pub filtered: Vec<ContactRecord>,
    pub search_term: String,
    /// 1-based.
    pub current_page: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub show_limit_popup: bool,
    pub selected: Option<ContactRecord>,
    pub last_source: Option<RecordSource>,
}

impl ContactsPage {
    pub fn new(gate: Arc<DailyViewGate>, user_id: UserId) -> Self {
        Self {
            gate,
            user_id,
            records: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            loading: false,
            error: None,
            show_limit_popup: false,
            selected: None,
            last_source: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn gate(&self) -> &DailyViewGate {
        &self.gate
    }

    /// Load today's records through the gate.
    ///
    /// Failures land in `error`; `loading` is always cleared on return.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        let today = self.gate.today_key();
        match self.gate.load_or_fetch(&self.user_id, today).await {
            Ok(outcome) => {
                self.records = outcome.records;
                self.last_source = Some(outcome.source);
                self.apply_search();
            }
            Err(GateError::Fetch(e)) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "contacts load failed");
                self.error = Some(FETCH_FAILED.to_string());
            }
            Err(e) => {
                tracing::warn!(user_id = %self.user_id, error = %e, "contacts load failed");
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.apply_search();
    }

    pub fn clear_search(&mut self) {
        self.search("");
    }

    fn apply_search(&mut self) {
        self.filtered = filter(&self.records, &self.search_term);
        self.current_page = 1;
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.gate.config().page_size)
    }

    /// Pagination controls are shown only when there is more than one page.
    pub fn pagination_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// The `page_size` rows of `filtered` on `current_page`.
    pub fn visible_rows(&self) -> &[ContactRecord] {
        let page_size = self.gate.config().page_size;
        let start = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(self.filtered.len());
        let end = start.saturating_add(page_size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn next(&mut self) -> Result<PageResult, GateError> {
        if !self.pagination_visible() {
            return Ok(PageResult::Blocked);
        }
        let result = self
            .gate
            .request_page(&self.user_id, self.current_page, PageDirection::Next)?;
        self.apply_page(result);
        Ok(result)
    }

    pub fn previous(&mut self) -> Result<PageResult, GateError> {
        if !self.pagination_visible() {
            return Ok(PageResult::Blocked);
        }
        let target = self.current_page.saturating_sub(1).max(1);
        let result = self.gate.goto_page(&self.user_id, target)?;
        self.apply_page(result);
        Ok(result)
    }

    fn apply_page(&mut self, result: PageResult) {
        match result {
            PageResult::Advance(page) => self.current_page = page,
            PageResult::LimitReached => self.show_limit_popup = true,
            PageResult::Blocked => {}
        }
    }

    pub fn close_popup(&mut self) {
        self.show_limit_popup = false;
    }

    /// Open the detail view for a 1-based row of the visible page.
    pub fn select_row(&mut self, row: usize) -> bool {
        match row.checked_sub(1).and_then(|i| self.visible_rows().get(i)) {
            Some(record) => {
                self.selected = Some(record.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn header_summary(&self) -> String {
        let count = self.filtered.len();
        if self.search_term.is_empty() {
            return format!("{} / {} daily limit", count, self.gate.config().daily_limit);
        }

        let total = self.total_pages();
        if total > 1 {
            format!(
                "{} results found • Page {} of {}",
                count, self.current_page, total
            )
        } else {
            format!("{} results found", count)
        }
    }

    pub fn reset_countdown(&self) -> String {
        time_until_reset(self.gate.clock().now()).to_string()
    }

    pub fn limit_message(&self) -> String {
        format!(
            "You have reached your daily limit of {} contacts. Your limit resets in {}.",
            self.gate.config().daily_limit,
            self.reset_countdown()
        )
    }
}
