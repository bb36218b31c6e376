//! Whitespace normalization for text pulled out of HTML.

/// Collapse every run of whitespace to a single space and trim both ends.
/// `None` normalizes to an empty string.
pub fn normalize(text: Option<&str>) -> String {
    text.map(normalize_str).unwrap_or_default()
}

pub fn normalize_str(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
