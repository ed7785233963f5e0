//! In-memory fetcher for unit tests.

use crate::config::{PacingConfig, ScoutConfig, SearchBackend};
use crate::fetch::{FetchError, FetchRequest, Fetched, Fetcher, Headers, Page};
use std::cell::RefCell;
use std::collections::HashMap;

pub(crate) const PRIMARY: &str = "https://search.example.net/find?q=";
pub(crate) const FALLBACK: &str = "https://duckduckgo.com/html/?q=";

/// Zero-delay config with two queries (`q1`, `q2`) and fixture search endpoints.
pub(crate) fn fixture_config() -> ScoutConfig {
    ScoutConfig {
        queries: vec!["q1".to_string(), "q2".to_string()],
        backends: vec![
            SearchBackend {
                name: "primary".to_string(),
                url_template: format!("{PRIMARY}{{query}}"),
                unwrap_param: None,
                delay_ms: 0,
            },
            SearchBackend {
                name: "fallback".to_string(),
                url_template: format!("{FALLBACK}{{query}}"),
                unwrap_param: Some("uddg".to_string()),
                delay_ms: 0,
            },
        ],
        pacing: PacingConfig::none(),
        ..ScoutConfig::default()
    }
}

/// Builds an HTML body with one anchor per href.
pub(crate) fn anchors(hrefs: &[&str]) -> String {
    let mut body = String::from("<html><body>");
    for href in hrefs {
        body.push_str(&format!("<a href=\"{href}\">link</a>\n"));
    }
    body.push_str("</body></html>");
    body
}

/// Routes URLs to canned outcomes. Unknown URLs answer HTTP 404.
#[derive(Default)]
pub(crate) struct FixtureFetcher {
    routes: HashMap<String, Fetched>,
    log: RefCell<Vec<FetchRequest>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn page(resolved: &str, status: u32, content_type: &str, body: &[u8]) -> Fetched {
        let headers: Headers = [("Content-Type", content_type)].into_iter().collect();
        Fetched::Page(Page {
            resolved_url: resolved.to_string(),
            status,
            headers,
            body: body.to_vec(),
        })
    }

    pub fn html(mut self, url: &str, body: &str) -> Self {
        let page = Self::page(url, 200, "text/html; charset=utf-8", body.as_bytes());
        self.routes.insert(url.to_string(), page);
        self
    }

    /// HTML served from `resolved` after a redirect from `url`.
    pub fn redirected_html(mut self, url: &str, resolved: &str, body: &str) -> Self {
        let page = Self::page(resolved, 200, "text/html", body.as_bytes());
        self.routes.insert(url.to_string(), page);
        self
    }

    pub fn document(mut self, url: &str, status: u32, content_type: &str) -> Self {
        let page = Self::page(url, status, content_type, b"%");
        self.routes.insert(url.to_string(), page);
        self
    }

    pub fn fail(mut self, url: &str, error: FetchError) -> Self {
        self.routes.insert(
            url.to_string(),
            Fetched::Unreachable {
                url: url.to_string(),
                error,
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.log.borrow().clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.log.borrow().iter().map(|r| r.url.clone()).collect()
    }

    pub fn count(&self, url: &str) -> usize {
        self.log.borrow().iter().filter(|r| r.url == url).count()
    }
}

impl Fetcher for FixtureFetcher {
    fn fetch(&self, request: &FetchRequest) -> Fetched {
        self.log.borrow_mut().push(request.clone());
        self.routes
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Fetched::Unreachable {
                url: request.url.clone(),
                error: FetchError::Status(404),
            })
    }
}
