//! Package index lookups.
//!
//! Provides the [`PackageIndex`] trait and an HTTP client for PyPI-style
//! indexes. Lookups are best-effort: callers treat every error as "unknown".

use anyhow::{bail, Result};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::sync::LazyLock;
use std::time::Duration;

use crate::install::is_valid_distribution_name;

/// Default public index.
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Default timeout for a single index request.
pub const DEFAULT_INDEX_TIMEOUT: Duration = Duration::from_secs(5);

/// First result name on the index search page.
static SEARCH_RESULT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="package-snippet__name"[^>]*>\s*([^<\s][^<]*?)\s*<"#)
        .expect("SEARCH_RESULT_NAME must compile")
});

/// A source of truth about which distributions exist.
pub trait PackageIndex {
    /// Whether a distribution with exactly this name exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Name of the first search result for `query`, if any.
    fn search_first(&self, query: &str) -> Result<Option<String>>;
}

/// PyPI-compatible index reached over HTTP.
pub struct HttpIndex {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpIndex {
    /// Create a client for a specific index.
    pub fn with_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pyensure/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the index base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl PackageIndex for HttpIndex {
    fn exists(&self, name: &str) -> Result<bool> {
        if !is_valid_distribution_name(name) {
            bail!("'{}' is not a distribution name", name);
        }
        let url = format!("{}/pypi/{}/json", self.base_url, name);
        let response = self.client.get(&url).send()?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => bail!("HTTP {} fetching {}", status, url),
        }
    }

    fn search_first(&self, query: &str) -> Result<Option<String>> {
        if !is_valid_distribution_name(query) {
            bail!("'{}' is not a distribution name", query);
        }
        // Distribution names are URL-safe as they are.
        let url = format!("{}/search/?q={}", self.base_url, query);
        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        let body = response.text()?;
        Ok(first_search_result(&body))
    }
}

/// Extract the first result name from a search results page.
pub fn first_search_result(html: &str) -> Option<String> {
    SEARCH_RESULT_NAME
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
}
