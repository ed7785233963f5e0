//! Link verification with a one-byte range probe.
//!
//! A URL is accepted when the probe answers with a 2xx/3xx status and either the
//! Content-Type carries a document/binary marker or the URL ends with the document
//! extension. Rejections are silent apart from debug logs.

use crate::config::ScoutConfig;
use crate::fetch::{pause, FetchError, FetchRequest, Fetched, Fetcher};
use crate::report::StageStats;
use crate::url_scope::DownloadHeuristic;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Unreachable(FetchError),
    Status(u32),
    NotADocument { content_type: Option<String> },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Unreachable(e) => write!(f, "unreachable ({})", e),
            RejectReason::Status(code) => write!(f, "HTTP {}", code),
            RejectReason::NotADocument {
                content_type: Some(ct),
            } => write!(f, "not a document (Content-Type: {})", ct),
            RejectReason::NotADocument { content_type: None } => {
                write!(f, "not a document (no Content-Type)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

pub struct Verifier<'a> {
    cfg: &'a ScoutConfig,
    fetcher: &'a dyn Fetcher,
    heuristic: DownloadHeuristic,
    content_type_markers: Vec<String>,
}

impl<'a> Verifier<'a> {
    pub fn new(cfg: &'a ScoutConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            cfg,
            fetcher,
            heuristic: DownloadHeuristic::from_config(cfg),
            content_type_markers: cfg
                .content_type_markers
                .iter()
                .map(|m| m.to_lowercase())
                .collect(),
        }
    }

    /// First-byte GET. The body cap keeps servers that ignore `Range` from streaming the file.
    pub fn probe_request(&self, url: &str) -> FetchRequest {
        FetchRequest::get(url, self.cfg.probe_timeout())
            .header("Range", "bytes=0-0")
            .header("Accept", "*/*")
            .body_limit(1)
    }

    /// Probes `url` once and judges the response.
    pub fn check(&self, url: &str) -> Verdict {
        let fetched = self.fetcher.fetch(&self.probe_request(url));
        self.judge(url, &fetched)
    }

    /// Applies the acceptance rule to a probe outcome.
    pub fn judge(&self, url: &str, fetched: &Fetched) -> Verdict {
        let page = match fetched {
            Fetched::Page(page) => page,
            Fetched::Unreachable { error, .. } => {
                return Verdict::Rejected(RejectReason::Unreachable(error.clone()))
            }
        };
        if !(200..400).contains(&page.status) {
            return Verdict::Rejected(RejectReason::Status(page.status));
        }
        let content_type = page.headers.content_type();
        let ct_lower = content_type.unwrap_or_default().to_lowercase();
        let typed_as_document = self
            .content_type_markers
            .iter()
            .any(|m| ct_lower.contains(m.as_str()));
        if typed_as_document || self.heuristic.has_document_extension(url) {
            Verdict::Accepted
        } else {
            Verdict::Rejected(RejectReason::NotADocument {
                content_type: content_type.map(str::to_string),
            })
        }
    }

    /// Probes every candidate in order and returns the accepted ones, first-verified first,
    /// without duplicates.
    pub fn verify_all(&self, urls: &[String], stats: &mut StageStats) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut verified = Vec::new();
        for url in urls {
            let fetched = self.fetcher.fetch(&self.probe_request(url));
            stats.record(&fetched);
            match self.judge(url, &fetched) {
                Verdict::Accepted => {
                    if seen.insert(url.as_str()) {
                        verified.push(url.clone());
                    }
                }
                Verdict::Rejected(reason) => {
                    tracing::debug!(url = %url, %reason, "rejected");
                }
            }
            pause(Duration::from_millis(self.cfg.pacing.probe_ms));
        }
        tracing::info!(
            candidates = urls.len(),
            verified = verified.len(),
            "verification done"
        );
        verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture_config, FixtureFetcher};

    fn urls(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn probe_carries_range_and_accept() {
        let cfg = fixture_config();
        let fetcher = FixtureFetcher::new();
        let req = Verifier::new(&cfg, &fetcher).probe_request("https://kanoon.ir/a.pdf");
        assert!(req.headers.contains(&("Range".to_string(), "bytes=0-0".to_string())));
        assert!(req.headers.contains(&("Accept".to_string(), "*/*".to_string())));
        assert_eq!(req.body_limit, Some(1));
        assert_eq!(req.timeout, cfg.probe_timeout());
    }

    #[test]
    fn content_type_or_extension_accepts() {
        let cfg = fixture_config();
        let fetcher = FixtureFetcher::new()
            .document("https://kanoon.ir/Download?id=1", 206, "application/pdf")
            .document("https://kanoon.ir/files/blob", 200, "Application/Octet-Stream")
            .document("https://kanoon.ir/files/x.PDF", 200, "text/html")
            .document("https://kanoon.ir/files/page", 200, "text/html; charset=utf-8");
        let v = Verifier::new(&cfg, &fetcher);
        assert!(v.check("https://kanoon.ir/Download?id=1").is_accepted());
        assert!(v.check("https://kanoon.ir/files/blob").is_accepted());
        assert!(v.check("https://kanoon.ir/files/x.PDF").is_accepted());
        assert_eq!(
            v.check("https://kanoon.ir/files/page"),
            Verdict::Rejected(RejectReason::NotADocument {
                content_type: Some("text/html; charset=utf-8".to_string())
            })
        );
    }

    #[test]
    fn failures_and_bad_statuses_reject() {
        let cfg = fixture_config();
        let fetcher = FixtureFetcher::new()
            .document("https://kanoon.ir/odd.pdf", 199, "application/pdf")
            .fail("https://kanoon.ir/slow.pdf", FetchError::Timeout);
        let v = Verifier::new(&cfg, &fetcher);
        assert_eq!(
            v.check("https://kanoon.ir/odd.pdf"),
            Verdict::Rejected(RejectReason::Status(199))
        );
        assert_eq!(
            v.check("https://kanoon.ir/slow.pdf"),
            Verdict::Rejected(RejectReason::Unreachable(FetchError::Timeout))
        );
        assert_eq!(
            v.check("https://kanoon.ir/missing.pdf"),
            Verdict::Rejected(RejectReason::Unreachable(FetchError::Status(404)))
        );
    }

    #[test]
    fn verify_all_keeps_order_and_drops_duplicates() {
        let cfg = fixture_config();
        let fetcher = FixtureFetcher::new()
            .document("https://kanoon.ir/b.pdf", 200, "application/pdf")
            .document("https://kanoon.ir/a.pdf", 200, "application/pdf")
            .document("https://kanoon.ir/page", 200, "text/html");
        let mut stats = StageStats::default();
        let verified = Verifier::new(&cfg, &fetcher).verify_all(
            &urls(&[
                "https://kanoon.ir/b.pdf",
                "https://kanoon.ir/page",
                "https://kanoon.ir/gone.pdf",
                "https://kanoon.ir/a.pdf",
                "https://kanoon.ir/b.pdf",
            ]),
            &mut stats,
        );
        assert_eq!(verified, vec!["https://kanoon.ir/b.pdf", "https://kanoon.ir/a.pdf"]);
        assert_eq!(stats, StageStats { requests: 5, unreachable: 1 });
    }

    #[test]
    fn reasons_render_for_humans() {
        assert_eq!(RejectReason::Status(500).to_string(), "HTTP 500");
        assert_eq!(
            RejectReason::Unreachable(FetchError::Timeout).to_string(),
            "unreachable (timed out)"
        );
        assert_eq!(
            RejectReason::NotADocument { content_type: None }.to_string(),
            "not a document (no Content-Type)"
        );
    }
}
