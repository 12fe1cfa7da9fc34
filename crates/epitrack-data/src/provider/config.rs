//! Provider connection settings.
//!
//! This module defines how the remote provider is reached. Settings are
//! plain data; the host application decides where they come from.

use std::time::Duration;

/// Default API root of the remote provider.
pub const DEFAULT_BASE_URL: &str = "https://api.api-ninjas.com/v1";

/// Default transport timeout for one request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the remote provider.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    /// API root, without a trailing slash (e.g. "https://api.api-ninjas.com/v1").
    pub base_url: String,

    /// Value of the `X-Api-Key` header.
    pub api_key: String,

    /// Transport timeout. This belongs to the HTTP client; the resolver
    /// imposes no timeout of its own.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Settings for the default endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
