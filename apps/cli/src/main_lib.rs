use std::sync::Arc;

use anyhow::Result;
use epitrack_data::{
    ApiNinjasProvider, CaseDataProvider, CountryResolver, FileSnapshot, HistoryStore,
    InMemoryKeyValueStore, KeyValueStore, Preferences, ProviderConfig, RetryPolicy,
    StaticCatalog,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::prefs_store::JsonFileStore;

pub struct AppState {
    pub catalog: StaticCatalog,
    pub resolver: CountryResolver,
    pub preferences: Preferences<Box<dyn KeyValueStore>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("EPITRACK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays clean on stdout.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config, offline: bool) -> Result<AppState> {
    let store = match &config.snapshot_path {
        Some(path) => HistoryStore::new(FileSnapshot::new(path)),
        None => HistoryStore::embedded(),
    };

    let provider: Option<Arc<dyn CaseDataProvider>> = match (&config.api_key, offline) {
        (_, true) => None,
        (None, false) => {
            tracing::warn!("EPITRACK_API_KEY is not set; answering from the snapshot only");
            None
        }
        (Some(api_key), false) => Some(Arc::new(ApiNinjasProvider::new(ProviderConfig {
            base_url: config.api_base_url.clone(),
            api_key: api_key.clone(),
            timeout: config.http_timeout,
        }))),
    };

    let resolver = CountryResolver::with_config(
        provider,
        Arc::new(store),
        RetryPolicy {
            max_attempts: config.live_attempts,
            backoff: config.retry_backoff,
        },
    );

    let kv_store: Box<dyn KeyValueStore> = match &config.prefs_path {
        Some(path) => Box::new(JsonFileStore::open(path)?),
        None => Box::new(InMemoryKeyValueStore::new()),
    };

    Ok(AppState {
        catalog: StaticCatalog::from_names(&config.countries),
        resolver,
        preferences: Preferences::new(kv_store),
    })
}
