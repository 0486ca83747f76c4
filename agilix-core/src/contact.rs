//! Contact records.
//!
//! A contact is a flat, ordered mapping of field name to string value. The
//! upstream CSV decides the schema, so no field is guaranteed to exist.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Columns shown in the contacts table, in display order.
pub const DISPLAY_COLUMNS: [&str; 5] = ["first_name", "last_name", "email", "phone", "title"];

/// Bookkeeping columns hidden from the contact detail view.
pub const EXCLUDE_COLUMNS: [&str; 4] = ["created_at", "updated_at", "email_type", "contact_form_url"];

/// Placeholder rendered for absent or empty values.
pub const MISSING_VALUE: &str = "N/A";

/// A single contact row. Serializes as a flat JSON object in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(value_type = Object))]
#[serde(transparent)]
pub struct ContactRecord(IndexMap<String, String>);

impl ContactRecord {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Insert or replace a field. Replacing keeps the original position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// True if any value contains `needle_lower`, ignoring case.
    ///
    /// The needle must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.values()
            .any(|value| value.to_lowercase().contains(needle_lower))
    }

    /// Value for a table cell, falling back to [`MISSING_VALUE`].
    pub fn cell(&self, column: &str) -> &str {
        match self.get(column) {
            Some(value) if !value.is_empty() => value,
            _ => MISSING_VALUE,
        }
    }

    /// Labeled fields for the detail view, skipping [`EXCLUDE_COLUMNS`].
    pub fn detail_fields(&self) -> Vec<(String, String)> {
        self.fields()
            .filter(|(key, _)| !EXCLUDE_COLUMNS.contains(key))
            .map(|(key, value)| {
                let value = if value.is_empty() { MISSING_VALUE } else { value };
                (format_field_label(key), value.to_string())
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContactRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Turn a snake_case field name into a display label.
///
/// `first_name` becomes `First name`.
pub fn format_field_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
