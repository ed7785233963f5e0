use crate::config::ScoutConfig;
use url::Url;

/// Classifies URLs that probably serve a file. Deliberately permissive; the
/// verifier makes the final call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHeuristic {
    /// Lowercase extension including the leading dot, e.g. ".pdf".
    suffix: String,
    /// Lowercase substrings of file-serving endpoints.
    markers: Vec<String>,
}

impl DownloadHeuristic {
    pub fn new<I, S>(extension: &str, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            suffix: format!(".{}", extension.trim_start_matches('.').to_lowercase()),
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn from_config(cfg: &ScoutConfig) -> Self {
        Self::new(&cfg.document_extension, &cfg.download_markers)
    }

    /// True if the URL path ends with the document extension (case-insensitive)
    /// or the URL contains a file-serving marker.
    pub fn looks_like_download(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        let path_matches = match Url::parse(url) {
            Ok(parsed) => parsed.path().to_lowercase().ends_with(&self.suffix),
            Err(_) => lower
                .split(['?', '#'])
                .next()
                .map(|p| p.ends_with(&self.suffix))
                .unwrap_or(false),
        };
        path_matches || self.markers.iter().any(|m| lower.contains(m.as_str()))
    }

    /// True if the URL string itself ends with the document extension.
    pub fn has_document_extension(&self, url: &str) -> bool {
        url.to_lowercase().ends_with(&self.suffix)
    }
}
