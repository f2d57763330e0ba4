//! Core configuration and error types for the regulation fetcher.

use std::path::PathBuf;
use std::time::Duration;

/// Host the builtin catalog paths are relative to.
pub const DEFAULT_BASE_URL: &str = "https://www.fipsas.it";

/// Where downloaded regulations land, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "frontend/public/documents/regulations/fipsas";

/// Desktop browser user agent. The regulation host serves an HTML
/// interstitial to unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pause between consecutive network attempts.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Files strictly larger than this are treated as already downloaded.
pub const MIN_VALID_SIZE: u64 = 10 * 1024;

/// Settings for a single fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
    pub delay: Duration,
    pub min_valid_size: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
            min_valid_size: MIN_VALID_SIZE,
        }
    }
}

impl FetchConfig {
    /// Config pointed at a different host, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut cfg = Self::default();
        cfg.set_base_url(base_url);
        cfg
    }

    /// Set the base URL, dropping any trailing slash so that joining with a
    /// catalog path (which starts with `/`) never doubles it.
    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
    }

    /// Full URL for a catalog path.
    pub fn url_for(&self, remote_path: &str) -> String {
        format!("{}{}", self.base_url, remote_path)
    }
}

/// Errors that abort a run. Per-entry failures are recorded in the report
/// instead.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list output directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("cannot read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Convenience result type.
pub type FetchResult<T> = Result<T, FetchError>;
