use serde::Deserialize;

/// Main configuration structure for sqlsweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scan: ScanConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub results: ResultsConfig,
}

/// Scan target and scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// The URL the crawl starts from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Injection payloads, tried in this order
    #[serde(default)]
    pub payloads: Vec<String>,

    /// Optional file of additional payloads, one per line
    #[serde(rename = "payload-file", default)]
    pub payload_file: Option<String>,

    /// Only follow links on the seed URL's domain
    #[serde(rename = "same-domain-only", default = "default_true")]
    pub same_domain_only: bool,

    /// Also follow links to subdomains of the seed host
    #[serde(rename = "include-subdomains", default)]
    pub include_subdomains: bool,

    /// URLs never enqueued, matched exactly after normalization
    #[serde(rename = "excluded-urls", default)]
    pub excluded_urls: Vec<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent on every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Result persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsConfig {
    /// Which progress store variant to use
    pub mode: StoreMode,

    /// Result file path (standalone) or crawl record id (service)
    pub target: String,
}

/// Progress store variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// File-backed JSON result store
    Standalone,
    /// External datastore supplied by an embedding application
    Service,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("sqlsweep/{}", env!("CARGO_PKG_VERSION"))
}
