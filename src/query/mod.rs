//! Query construction.
//!
//! Expands the category template table into concrete [`Query`] values for a
//! target.

mod templates;

use serde::Serialize;

use crate::error_handling::ScanError;

pub use templates::{QueryCategory, CATEGORIES, DOMAIN_PLACEHOLDER};

/// A search query bound to a target and category. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Query {
    pub text: String,
    pub category: String,
    pub target: String,
}

impl Query {
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
            target: target.into(),
        }
    }
}

/// All known category keys, in table order.
pub fn category_keys() -> Vec<&'static str> {
    CATEGORIES.iter().map(|c| c.key).collect()
}

/// Looks up a category by key or label, case-insensitively.
pub fn find_category(name: &str) -> Option<&'static QueryCategory> {
    let name = name.trim();
    CATEGORIES
        .iter()
        .find(|c| c.key.eq_ignore_ascii_case(name) || c.label.eq_ignore_ascii_case(name))
}

/// Resolves a user category selection to canonical keys.
///
/// An empty selection means every category. Duplicates are dropped while the
/// caller's order is kept.
///
/// # Errors
///
/// Returns `ScanError::UnknownCategory` for the first name not in the table.
pub fn resolve_categories(selected: &[String]) -> Result<Vec<String>, ScanError> {
    if selected.is_empty() {
        return Ok(category_keys().into_iter().map(String::from).collect());
    }

    let mut keys: Vec<String> = Vec::with_capacity(selected.len());
    for name in selected {
        let category =
            find_category(name).ok_or_else(|| ScanError::UnknownCategory(name.clone()))?;
        if !keys.iter().any(|k| k == category.key) {
            keys.push(category.key.to_string());
        }
    }
    Ok(keys)
}

/// Builds the queries for one target over the selected categories.
///
/// Categories are processed in the given order; `per_category_limit` keeps
/// only the first N templates of each.
pub fn build_queries(
    target: &str,
    categories: &[String],
    per_category_limit: Option<usize>,
) -> Result<Vec<Query>, ScanError> {
    let mut queries = Vec::new();
    for name in categories {
        let category =
            find_category(name).ok_or_else(|| ScanError::UnknownCategory(name.clone()))?;
        let limit = per_category_limit.unwrap_or(category.templates.len());
        queries.extend(category.templates.iter().take(limit).map(|template| {
            Query::new(
                template.replace(DOMAIN_PLACEHOLDER, target),
                category.key,
                target,
            )
        }));
    }
    Ok(queries)
}
