//! Two-phase bounded crawl from the search result pages.
//!
//! Phase one visits the seed pages, collects download-shaped links and adds other
//! in-scope links as candidate pages until the candidate cap is hit. Phase two
//! visits every candidate (seeds included) once more and only collects downloads.
//! There is no further recursion.

use crate::config::ScoutConfig;
use crate::fetch::{pause, FetchRequest, Fetched, Fetcher, Page};
use crate::links::HrefScanner;
use crate::report::StageStats;
use crate::url_scope::{normalize, DomainScope, DownloadHeuristic};
use std::collections::BTreeSet;
use std::time::Duration;

/// Result of [`CrawlExpander::expand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Final candidate page set, sorted.
    pub candidates: Vec<String>,
    /// Download-shaped URLs, sorted.
    pub downloads: Vec<String>,
}

pub struct CrawlExpander<'a> {
    cfg: &'a ScoutConfig,
    fetcher: &'a dyn Fetcher,
    scanner: &'a dyn HrefScanner,
    scope: DomainScope,
    heuristic: DownloadHeuristic,
}

impl<'a> CrawlExpander<'a> {
    pub fn new(cfg: &'a ScoutConfig, fetcher: &'a dyn Fetcher, scanner: &'a dyn HrefScanner) -> Self {
        Self {
            cfg,
            fetcher,
            scanner,
            scope: DomainScope::from_config(cfg),
            heuristic: DownloadHeuristic::from_config(cfg),
        }
    }

    pub fn expand(
        &self,
        seeds: &[String],
        expand_stats: &mut StageStats,
        revisit_stats: &mut StageStats,
    ) -> CrawlOutcome {
        let cap = self.cfg.max_candidate_pages;
        let mut candidates: BTreeSet<String> = BTreeSet::new();
        for seed in seeds {
            if candidates.len() >= cap {
                tracing::warn!(
                    cap,
                    seeds = seeds.len(),
                    "more seed pages than the candidate cap, dropping the rest"
                );
                break;
            }
            candidates.insert(seed.clone());
        }
        let mut downloads: BTreeSet<String> = BTreeSet::new();

        // Pages added below are only visited in phase two.
        let snapshot: Vec<String> = candidates.iter().cloned().collect();
        for url in &snapshot {
            if let Some(page) = self.visit(url, expand_stats) {
                for link in self.scoped_links(&page) {
                    if self.heuristic.looks_like_download(&link) {
                        downloads.insert(link);
                    } else if candidates.len() < cap {
                        candidates.insert(link);
                    }
                }
            }
            pause(Duration::from_millis(self.cfg.pacing.expand_ms));
        }
        tracing::info!(
            visited = snapshot.len(),
            candidates = candidates.len(),
            downloads = downloads.len(),
            "crawl phase one done"
        );

        for url in &candidates {
            if let Some(page) = self.visit(url, revisit_stats) {
                for link in self.scoped_links(&page) {
                    if self.heuristic.looks_like_download(&link) {
                        downloads.insert(link);
                    }
                }
            }
            pause(Duration::from_millis(self.cfg.pacing.revisit_ms));
        }
        tracing::info!(
            visited = candidates.len(),
            downloads = downloads.len(),
            "crawl phase two done"
        );

        CrawlOutcome {
            candidates: candidates.into_iter().collect(),
            downloads: downloads.into_iter().collect(),
        }
    }

    fn visit(&self, url: &str, stats: &mut StageStats) -> Option<Page> {
        let fetched = self.fetcher.fetch(&FetchRequest::get(url, self.cfg.fetch_timeout()));
        stats.record(&fetched);
        match fetched {
            Fetched::Page(page) => Some(page),
            Fetched::Unreachable { .. } => None,
        }
    }

    /// In-scope absolute links of a page, in document order.
    fn scoped_links(&self, page: &Page) -> Vec<String> {
        self.scanner
            .scan(&page.body)
            .iter()
            .filter_map(|href| normalize(href, &page.resolved_url))
            .filter(|link| self.scope.is_in_scope(link))
            .collect()
    }
}
