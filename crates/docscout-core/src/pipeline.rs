//! search → crawl → verify.

use crate::config::ScoutConfig;
use crate::crawl::CrawlExpander;
use crate::fetch::{CurlFetcher, Fetcher};
use crate::links::{AnchorScanner, HrefScanner};
use crate::report::{RunStats, ScoutReport};
use crate::search::SearchCollector;
use crate::verify::Verifier;

/// Runs the whole pipeline with the given transport and HTML scanner.
pub fn run(cfg: &ScoutConfig, fetcher: &dyn Fetcher, scanner: &dyn HrefScanner) -> ScoutReport {
    let mut stats = RunStats::default();

    let result_pages = SearchCollector::new(cfg, fetcher, scanner).collect(&mut stats.search);
    tracing::info!(pages = result_pages.len(), "search results collected");

    let crawl = CrawlExpander::new(cfg, fetcher, scanner).expand(
        &result_pages,
        &mut stats.expand,
        &mut stats.revisit,
    );

    let verified = Verifier::new(cfg, fetcher).verify_all(&crawl.downloads, &mut stats.verify);

    ScoutReport {
        result_pages,
        candidate_pages: crawl.candidates.len(),
        download_candidates: crawl.downloads,
        verified,
        stats,
    }
}

/// Runs the pipeline over libcurl with the anchor scanner.
pub fn run_with_defaults(cfg: &ScoutConfig) -> ScoutReport {
    let fetcher = CurlFetcher::from_config(cfg);
    let scanner = AnchorScanner::new();
    run(cfg, &fetcher, &scanner)
}
