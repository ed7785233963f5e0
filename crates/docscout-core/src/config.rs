use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder substituted with a pre-encoded query in search URL templates.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Desktop browser User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/119.0 Safari/537.36";

/// A search endpoint queried once per configured query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBackend {
    /// Short name used in logs.
    pub name: String,
    /// URL template containing `{query}`.
    pub url_template: String,
    /// Query parameter that wraps the real destination in result links (e.g. `uddg`).
    #[serde(default)]
    pub unwrap_param: Option<String>,
    /// Pause after each request to this backend, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,
}

impl SearchBackend {
    /// Substitutes the already percent-encoded `query` into the template verbatim.
    pub fn request_url(&self, query: &str) -> String {
        self.url_template.replace(QUERY_PLACEHOLDER, query)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Politeness delays for the crawl and verification stages (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause between page fetches in the first (expanding) crawl phase.
    pub expand_ms: u64,
    /// Pause between page fetches in the second (revisit) crawl phase.
    pub revisit_ms: u64,
    /// Pause between verification probes.
    pub probe_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            expand_ms: 400,
            revisit_ms: 250,
            probe_ms: 150,
        }
    }
}

impl PacingConfig {
    /// No pauses at all; used by tests and fixture runs.
    pub fn none() -> Self {
        Self {
            expand_ms: 0,
            revisit_ms: 0,
            probe_ms: 0,
        }
    }
}

/// Complete run configuration. Every component receives it explicitly; there is no global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Allow-listed hosts. A URL is in scope if its host equals one of these or is a subdomain.
    pub domains: Vec<String>,
    /// Pre-encoded search phrases, substituted into backend templates unchanged.
    pub queries: Vec<String>,
    /// Canonical document extension, without the dot.
    pub document_extension: String,
    /// Lowercase substrings marking file-serving URLs.
    pub download_markers: Vec<String>,
    /// Lowercase Content-Type substrings accepted as document/binary payloads.
    pub content_type_markers: Vec<String>,
    pub user_agent: String,
    /// Overall timeout for page fetches, in seconds.
    pub fetch_timeout_secs: u64,
    /// Overall timeout for verification probes, in seconds.
    pub probe_timeout_secs: u64,
    /// TCP/TLS connect timeout, in seconds.
    pub connect_timeout_secs: u64,
    /// Hard cap on the crawl candidate page set.
    pub max_candidate_pages: usize,
    /// Search backends, queried in order (primary first, then fallbacks).
    pub backends: Vec<SearchBackend>,
    pub pacing: PacingConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            domains: ["kanoon.ir", "www.kanoon.ir", "ghalamchi.ir", "www.ghalamchi.ir"]
                .map(String::from)
                .to_vec(),
            queries: vec![
                // "sample biology 12 questions"
                "%D9%86%D9%85%D9%88%D9%86%D9%87%20%D8%B3%D9%88%D8%A7%D9%84%D8%A7%D8%AA%20%D8%B2%DB%8C%D8%B3%D8%AA%20%D8%AF%D9%88%D8%A7%D8%B2%D8%AF%D9%87%D9%85".to_string(),
                // "sample biology 12 question"
                "%D9%86%D9%85%D9%88%D9%86%D9%87%20%D8%B3%D9%88%D8%A7%D9%84%20%D8%B2%DB%8C%D8%B3%D8%AA%20%D8%AF%D9%88%D8%A7%D8%B2%D8%AF%D9%87%D9%85".to_string(),
                // "sample biology (zist shenasi) 12 questions"
                "%D9%86%D9%85%D9%88%D9%86%D9%87%20%D8%B3%D9%88%D8%A7%D9%84%D8%A7%D8%AA%20%D8%B2%DB%8C%D8%B3%D8%AA%20%D8%B4%D9%86%D8%A7%D8%B3%DB%8C%20%D8%AF%D9%88%D8%A7%D8%B2%D8%AF%D9%87%D9%85".to_string(),
                // "biology 12 sample question"
                "%D8%B2%DB%8C%D8%B3%D8%AA%20%D8%B4%D9%86%D8%A7%D8%B3%DB%8C%20%D8%AF%D9%88%D8%A7%D8%B2%D8%AF%D9%87%D9%85%20%D9%86%D9%85%D9%88%D9%86%D9%87%20%D8%B3%D9%88%D8%A7%D9%84".to_string(),
            ],
            backends: vec![
                SearchBackend {
                    name: "kanoon".to_string(),
                    url_template: "https://www.kanoon.ir/Search?text={query}".to_string(),
                    unwrap_param: None,
                    delay_ms: 400,
                },
                SearchBackend {
                    name: "duckduckgo".to_string(),
                    url_template: "https://duckduckgo.com/html/?q=site%3Akanoon.ir+{query}"
                        .to_string(),
                    unwrap_param: Some("uddg".to_string()),
                    delay_ms: 500,
                },
            ],
            document_extension: "pdf".to_string(),
            download_markers: ["/file/", "/files/", "download", "filedownload", "attachment"]
                .map(String::from)
                .to_vec(),
            content_type_markers: ["pdf", "application", "octet-stream"]
                .map(String::from)
                .to_vec(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: 20,
            probe_timeout_secs: 20,
            connect_timeout_secs: 10,
            max_candidate_pages: 400,
            pacing: PacingConfig::default(),
        }
    }
}

impl ScoutConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Rejects configurations the pipeline cannot run meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.domains.iter().all(|d| d.trim().is_empty()) {
            anyhow::bail!("config: `domains` must name at least one host");
        }
        for backend in &self.backends {
            if !backend.url_template.contains(QUERY_PLACEHOLDER) {
                anyhow::bail!(
                    "config: backend `{}` url_template lacks {}",
                    backend.name,
                    QUERY_PLACEHOLDER
                );
            }
        }
        if self.max_candidate_pages == 0 {
            anyhow::bail!("config: `max_candidate_pages` must be greater than zero");
        }
        if self.document_extension.trim_start_matches('.').is_empty() {
            anyhow::bail!("config: `document_extension` is empty");
        }
        // libcurl treats a zero timeout as "wait forever".
        for (key, secs) in [
            ("fetch_timeout_secs", self.fetch_timeout_secs),
            ("probe_timeout_secs", self.probe_timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
        ] {
            if secs == 0 {
                anyhow::bail!("config: `{}` must be greater than zero", key);
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Path of the user config file (`$XDG_CONFIG_HOME/docscout/config.toml`), if one exists.
pub fn find_user_config() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("docscout")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load and validate configuration from an explicit TOML file.
pub fn load_from(path: &Path) -> Result<ScoutConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ScoutConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the user config file if one exists, otherwise the built-in defaults.
/// Never creates or writes files.
pub fn load_or_default() -> Result<ScoutConfig> {
    match find_user_config()? {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            load_from(&path)
        }
        None => {
            tracing::debug!("no user config found, using built-in defaults");
            Ok(ScoutConfig::default())
        }
    }
}
