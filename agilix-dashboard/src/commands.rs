//! REPL command parsing.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Search(String),
    Clear,
    /// 1-based row on the visible page.
    View(usize),
    Close,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command `{0}` (type `help`)")]
    Unknown(String),
    #[error("`view` needs a row number, e.g. `view 3`")]
    MissingRow,
    #[error("`{0}` is not a row number")]
    InvalidRow(String),
}

pub const HELP: &str = "\
next | n          next page
prev | p          previous page
search <term>     filter by any field (case-insensitive)
clear             clear the search
view <row>        open a contact from the current page
close             close the detail view or limit popup
reload            load today's contacts again
quit | q          exit";

/// Parse one input line. Blank lines yield `None`.
///
/// The search term loses its leading whitespace and keeps the rest.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "next" | "n" => Command::Next,
        "prev" | "p" | "previous" => Command::Prev,
        "search" | "/" => Command::Search(rest.trim_start().to_string()),
        "clear" => Command::Clear,
        "view" | "v" => {
            let row = rest.trim();
            if row.is_empty() {
                return Err(CommandError::MissingRow);
            }
            let row = row
                .parse::<usize>()
                .map_err(|_| CommandError::InvalidRow(row.to_string()))?;
            Command::View(row)
        }
        "close" => Command::Close,
        "reload" | "r" => Command::Reload,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
