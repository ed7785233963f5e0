use crate::config::ScoutConfig;
use url::Url;

/// Host allow-list. A host is in scope when it equals an allowed domain or is a subdomain of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    domains: Vec<String>,
}

impl DomainScope {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| canonical_host(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn from_config(cfg: &ScoutConfig) -> Self {
        Self::new(&cfg.domains)
    }

    pub fn contains_host(&self, host: &str) -> bool {
        let host = canonical_host(host);
        self.domains.iter().any(|d| is_same_or_subdomain(&host, d))
    }

    /// True iff `url` parses and its host (port ignored) is in scope.
    /// Malformed or host-less URLs are out of scope.
    pub fn is_in_scope(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => parsed
                .host_str()
                .map(|h| self.contains_host(h))
                .unwrap_or(false),
            Err(_) => false,
        }
    }
}

fn canonical_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    if host == domain {
        return true;
    }
    host.len() > domain.len()
        && host.ends_with(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}
