//! CSS selector helpers.

use scraper::{ElementRef, Selector};

/// Parses a CSS selector, falling back to one that matches nothing.
///
/// A bad selector in an extraction rule should disable that rule, not the
/// whole backend, so the error is logged and `*:not(*)` is returned instead.
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").unwrap_or_else(|_| {
            unreachable!("'*:not(*)' is a valid selector")
        })
    })
}

/// Concatenated text content of an element.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Text of the first descendant matching `selector`, if any.
pub fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|el| element_text(&el))
}
