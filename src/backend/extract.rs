//! Result extraction strategies.
//!
//! Search result markup drifts. Each engine carries an ordered list of
//! strategies; the first one whose items survive the caller's filtering wins. New document shapes
//! are added as new strategies without touching the backend, the fallback
//! chain, or the orchestrator.

use scraper::{ElementRef, Html, Selector};

use crate::utils::{element_text, first_text, parse_selector_with_fallback};

/// One candidate pulled out of a results page, before URL resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedItem {
    pub title: String,
    /// Raw `href`, possibly relative or an engine redirect.
    pub href: String,
    pub snippet: String,
}

/// A way of reading result records from one document shape.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn extract(&self, document: &Html) -> Vec<ExtractedItem>;
}

/// Runs strategies in order, passing each extraction through `accept`, and
/// returns the first non-empty accepted output.
///
/// A strategy whose items are all rejected (engine-internal links, say) falls
/// through to the next one.
pub fn extract_with<T>(
    strategies: &[Box<dyn ExtractionStrategy>],
    document: &Html,
    mut accept: impl FnMut(Vec<ExtractedItem>) -> Vec<T>,
) -> Vec<T> {
    for strategy in strategies {
        let items = strategy.extract(document);
        if items.is_empty() {
            continue;
        }
        let matched = items.len();
        let accepted = accept(items);
        if !accepted.is_empty() {
            log::trace!(
                "extraction strategy '{}' matched {} items, kept {}",
                strategy.name(),
                matched,
                accepted.len()
            );
            return accepted;
        }
        log::trace!(
            "extraction strategy '{}' matched {} items, none usable",
            strategy.name(),
            matched
        );
    }
    Vec::new()
}

/// Result containers with title, link, and snippet selectors inside each.
///
/// Title and snippet selectors are tried in order per container.
pub struct ContainerStrategy {
    name: String,
    container: Selector,
    titles: Vec<Selector>,
    link: Selector,
    snippets: Vec<Selector>,
}

impl ContainerStrategy {
    pub fn new(
        name: &str,
        container: &str,
        titles: &[&str],
        link: &str,
        snippets: &[&str],
    ) -> Self {
        Self {
            name: name.to_string(),
            container: parse_selector_with_fallback(container, name),
            titles: titles
                .iter()
                .map(|s| parse_selector_with_fallback(s, name))
                .collect(),
            link: parse_selector_with_fallback(link, name),
            snippets: snippets
                .iter()
                .map(|s| parse_selector_with_fallback(s, name))
                .collect(),
        }
    }

    fn read_item(&self, container: ElementRef<'_>) -> Option<ExtractedItem> {
        let link = container.select(&self.link).next()?;
        let href = link.value().attr("href")?.trim().to_string();
        if href.is_empty() {
            return None;
        }

        let title = self
            .titles
            .iter()
            .find_map(|sel| first_text(&container, sel))
            .unwrap_or_else(|| element_text(&link));
        let snippet = self
            .snippets
            .iter()
            .find_map(|sel| first_text(&container, sel))
            .unwrap_or_default();

        Some(ExtractedItem { title, href, snippet })
    }
}

impl ExtractionStrategy for ContainerStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, document: &Html) -> Vec<ExtractedItem> {
        document
            .select(&self.container)
            .filter_map(|container| self.read_item(container))
            .collect()
    }
}

/// Last resort: every anchor that wraps a heading.
///
/// Catches layouts where the container classes changed but results are still
/// rendered as `<a href><h3>title</h3></a>`.
pub struct HeadingAnchorStrategy {
    anchor: Selector,
    heading: Selector,
}

impl HeadingAnchorStrategy {
    pub fn new() -> Self {
        Self {
            anchor: parse_selector_with_fallback("a[href]", "heading anchors"),
            heading: parse_selector_with_fallback("h3, h2", "heading anchors"),
        }
    }
}

impl Default for HeadingAnchorStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionStrategy for HeadingAnchorStrategy {
    fn name(&self) -> &str {
        "heading-anchor"
    }

    fn extract(&self, document: &Html) -> Vec<ExtractedItem> {
        document
            .select(&self.anchor)
            .filter_map(|anchor| {
                let title = first_text(&anchor, &self.heading)?;
                let href = anchor.value().attr("href")?.trim().to_string();
                Some(ExtractedItem {
                    title,
                    href,
                    snippet: String::new(),
                })
            })
            .collect()
    }
}
