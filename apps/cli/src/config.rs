//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use epitrack_data::provider::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use epitrack_data::resolver::DEFAULT_BACKOFF;

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the case data API
    pub api_base_url: String,

    /// API key; without one the resolver runs offline
    pub api_key: Option<String>,

    /// Snapshot file replacing the bundled one
    pub snapshot_path: Option<PathBuf>,

    /// Transport timeout for each provider request
    pub http_timeout: Duration,

    /// Provider calls per resolution
    pub live_attempts: u32,

    /// Pause between provider calls
    pub retry_backoff: Duration,

    /// Catalog override, in order; empty means the default list
    pub countries: Vec<String>,

    /// File that remembers preferences between runs
    pub prefs_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url =
            var("EPITRACK_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = var("EPITRACK_API_KEY");
        let snapshot_path = var("EPITRACK_SNAPSHOT_PATH").map(PathBuf::from);
        let prefs_path = var("EPITRACK_PREFS_PATH").map(PathBuf::from);

        let http_timeout = match var("EPITRACK_HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse::<u64>().with_context(|| {
                format!("EPITRACK_HTTP_TIMEOUT_SECS must be whole seconds, got '{}'", raw)
            })?),
            None => DEFAULT_TIMEOUT,
        };

        let live_attempts = match var("EPITRACK_LIVE_ATTEMPTS") {
            Some(raw) => raw.trim().parse::<u32>().with_context(|| {
                format!("EPITRACK_LIVE_ATTEMPTS must be a positive integer, got '{}'", raw)
            })?,
            None => 1,
        };
        if live_attempts == 0 {
            anyhow::bail!("EPITRACK_LIVE_ATTEMPTS must be at least 1");
        }

        let retry_backoff = match var("EPITRACK_RETRY_BACKOFF_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().with_context(|| {
                format!("EPITRACK_RETRY_BACKOFF_MS must be milliseconds, got '{}'", raw)
            })?),
            None => DEFAULT_BACKOFF,
        };

        let countries = var("EPITRACK_COUNTRIES")
            .map(|raw| {
                raw.split(',')
                    .map(|name| name.trim().to_string())
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            api_base_url,
            api_key,
            snapshot_path,
            http_timeout,
            live_attempts,
            retry_backoff,
            countries,
            prefs_path,
        })
    }
}
