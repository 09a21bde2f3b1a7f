//! Link extraction from fetched pages

use crate::url::{normalize_href, ScopePolicy};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts in-scope candidate URLs from anchor tags.
pub struct LinkExtractor {
    policy: ScopePolicy,
    excluded: Vec<String>,
}

impl LinkExtractor {
    /// Creates an extractor with the given scope policy and excluded URLs.
    /// Excluded entries are matched exactly against normalized candidates, so
    /// they should be normalized by the caller.
    pub fn new(policy: ScopePolicy, excluded: Vec<String>) -> Self {
        Self { policy, excluded }
    }

    /// Returns the normalized, in-scope URLs found on a page, deduplicated
    /// and in document order.
    pub fn extract(&self, html: &str, base: &Url) -> Vec<String> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        let Ok(anchor_selector) = Selector::parse("a[href]") else {
            return links;
        };

        for element in document.select(&anchor_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let Some(link) = normalize_href(href, base) else {
                continue;
            };

            if !self.policy.allows(&link.host, link.explicit_host) {
                tracing::trace!("Out of scope: {}", link.url);
                continue;
            }

            if self.excluded.iter().any(|excluded| excluded == &link.url) {
                tracing::debug!("Excluded by configuration: {}", link.url);
                continue;
            }

            if seen.insert(link.url.clone()) {
                links.push(link.url);
            }
        }

        links
    }
}
