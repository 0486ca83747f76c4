//! Agilix dashboard entry point.

use std::io::Write;
use std::sync::Arc;

use agilix_dashboard::commands::{parse_command, Command, HELP};
use agilix_dashboard::config::DashboardConfig;
use agilix_dashboard::error::DashboardError;
use agilix_dashboard::render::render_page;
use agilix_dashboard::state::ContactsPage;
use agilix_dashboard::telemetry::init_logging;
use agilix_gate::{ready_user, GateError, PageResult};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    let config = DashboardConfig::load()?;
    init_logging(&config.log_level)?;

    let user_id = ready_user(Some(config.user_id.as_str()))?;
    let gate = Arc::new(agilix_dashboard::build_gate(&config)?);
    let mut page = ContactsPage::new(gate, user_id);

    page.load().await;
    show(&render_page(&page))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => handle_command(&mut page, command).await?,
            Err(err) => show(&err.to_string())?,
        }
    }

    Ok(())
}

async fn handle_command(page: &mut ContactsPage, command: Command) -> Result<(), DashboardError> {
    match command {
        Command::Next => {
            let result = page.next();
            show_page_move(page, result)?;
        }
        Command::Prev => {
            let result = page.previous();
            show_page_move(page, result)?;
        }
        Command::Search(term) => {
            page.search(&term);
            show(&render_page(page))?;
        }
        Command::Clear => {
            page.clear_search();
            show(&render_page(page))?;
        }
        Command::View(row) => {
            if page.select_row(row) {
                show(&render_page(page))?;
            } else {
                show(&format!("No row {} on this page.", row))?;
            }
        }
        Command::Close => {
            if page.selected.is_some() {
                page.close_detail();
            } else {
                page.close_popup();
            }
            show(&render_page(page))?;
        }
        Command::Reload => {
            page.load().await;
            show(&render_page(page))?;
        }
        Command::Help => show(HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn show_page_move(
    page: &ContactsPage,
    result: Result<PageResult, GateError>,
) -> std::io::Result<()> {
    match result {
        Ok(PageResult::Blocked) => show("No more pages."),
        Ok(_) => show(&render_page(page)),
        Err(err) => {
            tracing::error!(error = %err, "page change failed");
            show(&err.to_string())
        }
    }
}

fn show(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text.trim_end())?;
    stdout.flush()
}

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "contacts> ")?;
    stdout.flush()
}
