//! Case source configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Public dataset of reported cases on the Colombian open-data portal.
pub const DEFAULT_URL: &str = "https://www.datos.gov.co/resource/gt2j-8ykr.json";

/// Configuration for the case source and its cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// SODA dataset endpoint, without query string.
    pub url: String,
    /// Value sent as `$limit`.
    pub limit: u32,
    /// Read rows from this JSON file instead of the portal.
    pub file: Option<PathBuf>,
    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,
    /// How long fetched rows are reused, in seconds. `0` disables caching.
    pub cache_ttl_secs: u64,
}

impl SourceConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            limit: 20_000,
            file: None,
            timeout_secs: 30,
            cache_ttl_secs: 300,
        }
    }
}
