//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector coming from configuration.
///
/// The parser error borrows the input, so it is flattened into a message.
pub fn parse_selector(selector_str: &str) -> Result<Selector, String> {
    Selector::parse(selector_str).map_err(|e| e.to_string())
}

/// Parses a CSS selector that must succeed (for compile-time constants).
///
/// This function panics if parsing fails, which is appropriate for static selectors
/// that are compile-time constants. Use `parse_selector()` for selectors that
/// come from configuration.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
pub fn parse_selector_unsafe(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!(
            "Failed to parse CSS selector '{}' in {}: {}. This is a programming error.",
            selector_str, context, e
        )
    })
}
