//! Utility functions.
//!
//! This module provides:
//! - String sanitization and truncation for scraped fields and error messages
//! - CSS selector parsing and text extraction helpers

pub mod sanitize;
mod selector;

pub use sanitize::{clean_field, collapse_whitespace, sanitize_and_truncate_error_message};
pub use selector::{element_text, first_text, parse_selector_with_fallback};
