//! Plain-text rendering of the contacts page.

use std::fmt::Write;

use agilix_core::{ContactRecord, DISPLAY_COLUMNS};

use crate::state::{ContactsPage, UPGRADE_PATH};

/// `first_name` -> `FIRST NAME`.
pub fn column_header(column: &str) -> String {
    column.replace('_', " ").to_uppercase()
}

/// Render the whole page: header, table or status line, pagination, and any
/// open overlay (detail view or limit popup).
pub fn render_page(page: &ContactsPage) -> String {
    let mut out = String::new();

    if let Some(error) = &page.error {
        let _ = writeln!(out, "Error: {}", error);
        let _ = writeln!(out, "(type `reload` to try again)");
        return out;
    }

    let _ = writeln!(out, "Contacts  [{}]", page.header_summary());
    if !page.search_term.is_empty() {
        let _ = writeln!(out, "Search: {}", page.search_term);
    }
    let _ = writeln!(out);

    if page.loading {
        let _ = writeln!(out, "Loading contacts...");
    } else if page.filtered.is_empty() {
        let _ = writeln!(out, "No contacts found");
    } else {
        render_table(&mut out, page.visible_rows());
        if page.pagination_visible() {
            let _ = writeln!(out, "\n< prev | page {} | next >", page.current_page);
        }
    }

    if let Some(record) = &page.selected {
        let _ = writeln!(out);
        render_detail(&mut out, record);
    }

    if page.show_limit_popup {
        let _ = writeln!(out);
        let _ = writeln!(out, "** Daily Limit Reached **");
        let _ = writeln!(out, "{}", page.limit_message());
        let _ = writeln!(out, "Upgrade to Unlock Unlimited: {}", UPGRADE_PATH);
    }

    out
}

fn render_table(out: &mut String, rows: &[ContactRecord]) {
    let headers: Vec<String> = DISPLAY_COLUMNS.iter().map(|c| column_header(c)).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, column) in widths.iter_mut().zip(DISPLAY_COLUMNS) {
            *width = (*width).max(row.cell(column).chars().count());
        }
    }

    let _ = write!(out, "{:>3}  ", "#");
    for (header, width) in headers.iter().zip(&widths) {
        let _ = write!(out, "{:<width$}  ", header, width = width);
    }
    let _ = writeln!(out);

    for (index, row) in rows.iter().enumerate() {
        let _ = write!(out, "{:>3}  ", index + 1);
        for (column, width) in DISPLAY_COLUMNS.iter().zip(&widths) {
            let _ = write!(out, "{:<width$}  ", row.cell(column), width = width);
        }
        let _ = writeln!(out);
    }
}

fn render_detail(out: &mut String, record: &ContactRecord) {
    let name = format!(
        "{} {}",
        record.get("first_name").unwrap_or_default(),
        record.get("last_name").unwrap_or_default()
    );
    let _ = write!(out, "== {} ", name.trim());
    match record.get("title").filter(|t| !t.is_empty()) {
        Some(title) => {
            let _ = writeln!(out, "({}) ==", title);
        }
        None => {
            let _ = writeln!(out, "==");
        }
    }
    for (label, value) in record.detail_fields() {
        let _ = writeln!(out, "{}: {}", label, value);
    }
    let _ = writeln!(out, "(type `close` to dismiss)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use agilix_core::GateConfig;
    use agilix_gate::{DailyViewGate, GateError};
    use agilix_test_utils::fixtures::{midday_clock, sample_contacts, test_user};
    use agilix_test_utils::{InMemoryStateStore, MockContactProvider};
    use std::sync::Arc;

    async fn loaded_page(count: usize) -> Result<ContactsPage, GateError> {
        let gate = DailyViewGate::new(
            Arc::new(InMemoryStateStore::new()),
            Arc::new(MockContactProvider::new(sample_contacts(count))),
            GateConfig::default(),
        )?
        .with_clock(Arc::new(midday_clock()));
        let mut page = ContactsPage::new(Arc::new(gate), test_user());
        page.load().await;
        Ok(page)
    }

    #[test]
    fn test_column_header() {
        assert_eq!(column_header("first_name"), "FIRST NAME");
        assert_eq!(column_header("title"), "TITLE");
    }

    #[tokio::test]
    async fn test_table_shows_display_columns_only() -> Result<(), GateError> {
        let page = loaded_page(12).await?;
        let text = render_page(&page);

        assert!(text.contains("12 / 50 daily limit"));
        assert!(text.contains("FIRST NAME"));
        assert!(text.contains("contact0@agency.example"));
        assert!(!text.contains("CREATED AT"));
        assert!(!text.contains("contact10@agency.example"));
        assert!(text.contains("page 1"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_list_and_popup() -> Result<(), GateError> {
        let mut page = loaded_page(0).await?;
        page.show_limit_popup = true;
        let text = render_page(&page);

        assert!(text.contains("No contacts found"));
        assert!(text.contains("Daily Limit Reached"));
        assert!(text.contains("resets in 12h 0m"));
        assert!(text.contains("/upgrade"));
        Ok(())
    }

    #[tokio::test]
    async fn test_detail_hides_excluded_columns() -> Result<(), GateError> {
        let mut page = loaded_page(3).await?;
        page.select_row(2);
        let text = render_page(&page);

        assert!(text.contains("== First1 Last1 (Manager) =="));
        assert!(text.contains("Agency name: Agency 1"));
        assert!(!text.contains("Email type"));
        assert!(!text.contains("Contact form url"));
        Ok(())
    }

    #[tokio::test]
    async fn test_error_replaces_content() -> Result<(), GateError> {
        let mut page = loaded_page(3).await?;
        page.error = Some("Failed to fetch contacts".to_string());
        let text = render_page(&page);
        assert!(text.starts_with("Error: Failed to fetch contacts"));
        assert!(!text.contains("FIRST NAME"));
        Ok(())
    }
}
