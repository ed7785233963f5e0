//! Search-result collection: run every query against every backend and keep the
//! in-scope result links.

use crate::config::{ScoutConfig, SearchBackend};
use crate::fetch::{pause, FetchRequest, Fetched, Fetcher};
use crate::links::HrefScanner;
use crate::report::StageStats;
use crate::url_scope::{normalize, unwrap_redirect, DomainScope};
use std::collections::BTreeSet;

pub struct SearchCollector<'a> {
    cfg: &'a ScoutConfig,
    fetcher: &'a dyn Fetcher,
    scanner: &'a dyn HrefScanner,
    scope: DomainScope,
}

impl<'a> SearchCollector<'a> {
    pub fn new(cfg: &'a ScoutConfig, fetcher: &'a dyn Fetcher, scanner: &'a dyn HrefScanner) -> Self {
        Self {
            cfg,
            fetcher,
            scanner,
            scope: DomainScope::from_config(cfg),
        }
    }

    /// Queries each backend in order with every configured query. A failed request
    /// contributes nothing and the remaining queries still run.
    /// Returns the in-scope result pages sorted.
    pub fn collect(&self, stats: &mut StageStats) -> Vec<String> {
        let mut found = BTreeSet::new();
        for backend in &self.cfg.backends {
            let before = found.len();
            for query in &self.cfg.queries {
                let request = FetchRequest::get(backend.request_url(query), self.cfg.fetch_timeout());
                let fetched = self.fetcher.fetch(&request);
                stats.record(&fetched);
                if let Fetched::Page(page) = &fetched {
                    for href in self.scanner.scan(&page.body) {
                        if let Some(link) = self.result_link(&href, &page.resolved_url, backend) {
                            found.insert(link);
                        }
                    }
                }
                pause(backend.delay());
            }
            tracing::info!(
                backend = %backend.name,
                new_pages = found.len() - before,
                "search backend done"
            );
        }
        found.into_iter().collect()
    }

    fn result_link(&self, href: &str, base: &str, backend: &SearchBackend) -> Option<String> {
        let mut full = normalize(href, base)?;
        if let Some(param) = &backend.unwrap_param {
            full = unwrap_redirect(&full, param);
        }
        self.scope.is_in_scope(&full).then_some(full)
    }
}
