//! Counters and the end-of-run report.

use crate::fetch::Fetched;

/// Fetch counters for one stage of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageStats {
    pub requests: usize,
    pub unreachable: usize,
}

impl StageStats {
    pub fn record(&mut self, fetched: &Fetched) {
        self.requests += 1;
        if fetched.is_unreachable() {
            self.unreachable += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub search: StageStats,
    pub expand: StageStats,
    pub revisit: StageStats,
    pub verify: StageStats,
}

impl RunStats {
    pub fn requests(&self) -> usize {
        self.search.requests + self.expand.requests + self.revisit.requests + self.verify.requests
    }

    pub fn unreachable(&self) -> usize {
        self.search.unreachable
            + self.expand.unreachable
            + self.revisit.unreachable
            + self.verify.unreachable
    }
}

/// Everything a pipeline run produced. Only `verified` is user-facing output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoutReport {
    /// In-scope search result pages, sorted.
    pub result_pages: Vec<String>,
    /// Size of the crawl candidate set after expansion.
    pub candidate_pages: usize,
    /// Download-shaped URLs found while crawling, sorted.
    pub download_candidates: Vec<String>,
    /// Verified URLs in first-verified order, no duplicates.
    pub verified: Vec<String>,
    pub stats: RunStats,
}
