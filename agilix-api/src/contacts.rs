//! CSV contact source.
//!
//! The contacts file has a header row; each later row becomes one
//! [`ContactRecord`] keyed by header name, in header order. Values are kept
//! as raw strings.

use std::path::{Path, PathBuf};

use agilix_core::ContactRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Read every row of the CSV at `path`.
pub fn read_contacts(path: &Path) -> Result<Vec<ContactRecord>, ContactsError> {
    let file = std::fs::File::open(path).map_err(|source| ContactsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_contacts(file).map_err(|source| ContactsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_contacts<R: std::io::Read>(reader: R) -> Result<Vec<ContactRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        // Short rows simply lack the trailing fields.
        records.push(headers.iter().zip(row.iter()).collect());
    }
    Ok(records)
}
