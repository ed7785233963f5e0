//! HTTP fetching.
//!
//! A fetch never fails at the call site: transport errors, timeouts and error
//! statuses all come back as [`Fetched::Unreachable`], so callers branch on the
//! outcome instead of propagating errors.

mod error;
mod headers;
mod transport;

pub use error::{classify_status, FetchError};
pub use headers::Headers;
pub use transport::CurlFetcher;

use std::time::Duration;

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub timeout: Duration,
    pub follow_redirects: bool,
    /// Extra request headers, sent after the User-Agent.
    pub headers: Vec<(String, String)>,
    /// Stop reading the body after this many bytes.
    pub body_limit: Option<usize>,
}

impl FetchRequest {
    /// GET following redirects, no extra headers, unbounded body.
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
            follow_redirects: true,
            headers: Vec::new(),
            body_limit: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = Some(limit);
        self
    }
}

/// A usable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL after redirects (the request URL when redirects are not followed).
    pub resolved_url: String,
    pub status: u32,
    pub headers: Headers,
    pub body: Vec<u8>,
}

/// Outcome of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Page(Page),
    Unreachable { url: String, error: FetchError },
}

impl Fetched {
    /// Final URL of the page, or the request URL when nothing was fetched.
    pub fn resolved_url(&self) -> &str {
        match self {
            Fetched::Page(page) => &page.resolved_url,
            Fetched::Unreachable { url, .. } => url,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            Fetched::Page(page) => Some(page),
            Fetched::Unreachable { .. } => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Fetched::Unreachable { .. })
    }
}

/// Politeness delay between requests; zero means no pause.
pub fn pause(delay: Duration) {
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

/// Performs blocking GET requests. Implemented by [`CurlFetcher`] and by test fixtures.
pub trait Fetcher {
    fn fetch(&self, request: &FetchRequest) -> Fetched;
}
