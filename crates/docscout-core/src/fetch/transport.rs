//! libcurl-backed fetcher. Each request runs on the calling thread with its own easy handle.

use super::{classify_status, FetchError, FetchRequest, Fetched, Fetcher, Headers, Page};
use crate::config::ScoutConfig;
use std::str;
use std::time::Duration;

const MAX_REDIRECTS: u32 = 10;

#[derive(Debug, Clone)]
pub struct CurlFetcher {
    user_agent: String,
    connect_timeout: Duration,
}

impl CurlFetcher {
    pub fn new(user_agent: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
        }
    }

    pub fn from_config(cfg: &ScoutConfig) -> Self {
        Self::new(cfg.user_agent.clone(), cfg.connect_timeout())
    }

    fn perform(&self, request: &FetchRequest) -> Result<Page, FetchError> {
        match url::Url::parse(&request.url) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => {}
            _ => return Err(FetchError::InvalidUrl(request.url.clone())),
        }

        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;

        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(request.follow_redirects)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.connect_timeout.min(request.timeout))?;
        easy.timeout(request.timeout)?;

        if !request.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &request.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }

        let limit = request.body_limit;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if let Some(limit) = limit {
                    let room = limit.saturating_sub(body.len());
                    if data.len() > room {
                        body.extend_from_slice(&data[..room]);
                        truncated = true;
                        // Returning short aborts the transfer.
                        return Ok(0);
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        match performed {
            Ok(()) => {}
            Err(e) if truncated && e.is_write_error() => {
                tracing::trace!(url = %request.url, "body limit reached, transfer stopped");
            }
            Err(e) => return Err(e.into()),
        }

        let status = easy.response_code()?;
        if let Some(err) = classify_status(status) {
            return Err(err);
        }

        let resolved_url = if request.follow_redirects {
            easy.effective_url()?
                .map(str::to_string)
                .unwrap_or_else(|| request.url.clone())
        } else {
            request.url.clone()
        };

        Ok(Page {
            resolved_url,
            status,
            headers: Headers::from_lines(&header_lines),
            body,
        })
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, request: &FetchRequest) -> Fetched {
        match self.perform(request) {
            Ok(page) => {
                tracing::debug!(
                    url = %request.url,
                    resolved = %page.resolved_url,
                    status = page.status,
                    bytes = page.body.len(),
                    "fetched"
                );
                Fetched::Page(page)
            }
            Err(error) => {
                tracing::debug!(url = %request.url, %error, "fetch failed");
                Fetched::Unreachable {
                    url: request.url.clone(),
                    error,
                }
            }
        }
    }
}
