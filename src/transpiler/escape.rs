//! Identifier allow-listing.
//!
//! Table, view, column and alias names are interpolated into SQL text, so
//! they are restricted to plain (optionally dot-qualified) identifiers.

use crate::error::{ExtractError, ExtractResult};
use super::Dialect;

/// Accept `name`, `schema.name` or `db.schema.name` where each part starts
/// with a letter or underscore and continues with letters, digits, `_`, `$`.
pub fn validate_identifier(name: &str) -> ExtractResult<&str> {
    if !name.is_empty() && name.split('.').all(is_plain_identifier) {
        Ok(name)
    } else {
        Err(ExtractError::InvalidIdentifier(name.to_string()))
    }
}

/// Validate `name` and render it for SQL text. With `quote` set, each
/// dot-separated part is quoted for `dialect`, which keeps mixed-case names
/// from being folded by the database.
pub fn render_identifier(name: &str, dialect: Dialect, quote: bool) -> ExtractResult<String> {
    let name = validate_identifier(name)?;
    if !quote {
        return Ok(name.to_string());
    }
    let parts: Vec<String> = name.split('.').map(|part| dialect.quote_identifier(part)).collect();
    Ok(parts.join("."))
}

fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
