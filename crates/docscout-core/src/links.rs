//! Anchor href extraction from HTML.

use scraper::{Html, Selector};

/// Scans an HTML body for anchor targets.
pub trait HrefScanner {
    /// Every non-empty `<a href>` value in document order, duplicates included.
    /// Malformed markup yields partial or empty output, never an error.
    fn scan(&self, body: &[u8]) -> Vec<String>;
}

/// [`HrefScanner`] backed by an html5ever DOM parse.
#[derive(Debug, Clone)]
pub struct AnchorScanner {
    selector: Selector,
}

impl AnchorScanner {
    pub fn new() -> Self {
        let selector = Selector::parse("a[href]").expect("anchor selector");
        Self { selector }
    }
}

impl Default for AnchorScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl HrefScanner for AnchorScanner {
    fn scan(&self, body: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(body);
        let document = Html::parse_document(&text);
        document
            .select(&self.selector)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Convenience wrapper using a fresh [`AnchorScanner`].
pub fn extract_links(body: &[u8]) -> Vec<String> {
    AnchorScanner::new().scan(body)
}
