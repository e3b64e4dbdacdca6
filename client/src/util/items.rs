//! Display helpers for backend resource items.
//!
//! Items are free-form JSON documents owned by the backend, so admin pages
//! show a one-line label plus the raw document.

#[cfg(test)]
#[path = "items_test.rs"]
mod items_test;

use serde_json::Value;

const LABEL_FIELDS: [&str; 6] = ["name", "title", "heading", "email", "question", "step"];
const MAX_LABEL_CHARS: usize = 80;

/// One-line label: the first non-empty well-known text field, else the `_id`.
#[must_use]
pub fn item_label(item: &Value) -> String {
    let label = LABEL_FIELDS
        .iter()
        .find_map(|field| {
            item.get(*field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
        })
        .or_else(|| session::catalog::item_id(item))
        .unwrap_or("(untitled)");
    truncate(label, MAX_LABEL_CHARS)
}

/// Pretty-printed document for the detail view.
#[must_use]
pub fn item_details(item: &Value) -> String {
    serde_json::to_string_pretty(item).unwrap_or_else(|_| item.to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
