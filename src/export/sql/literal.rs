//! String literal encoding for generated statements
//!
//! Literals are double-quoted. The only transformation applied is `"` to
//! `\"`; backslashes and control characters pass through untouched, so a
//! value containing them may be rejected by the target engine.

/// Marker written for an absent value
pub const NULL: &str = "NULL";

/// Escape a value for use inside a double-quoted literal
pub fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Escape and wrap a value in double quotes
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

/// Quoted literal for `Some`, `NULL` for `None`
pub fn quote_or_null(value: Option<&str>) -> String {
    value.map_or_else(|| NULL.to_string(), quote)
}
