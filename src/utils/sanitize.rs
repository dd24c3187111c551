//! Text cleanup for scraped fields and stored error messages.

use crate::config::MAX_ERROR_MESSAGE_LENGTH;

/// Removes control characters other than tab, newline, and carriage return.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Sanitizes an error message and truncates it to `MAX_ERROR_MESSAGE_LENGTH`
/// characters, noting the original length when it was cut.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();
    if length <= MAX_ERROR_MESSAGE_LENGTH {
        return sanitized;
    }
    format!(
        "{}... (truncated, original length: {} chars)",
        truncate_chars(&sanitized, MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50)),
        length
    )
}

/// Returns at most `max_chars` characters of `text`, never splitting a
/// character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a scraped text field: whitespace collapsed, then truncated.
pub fn clean_field(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    truncate_chars(&collapsed, max_chars).to_string()
}
