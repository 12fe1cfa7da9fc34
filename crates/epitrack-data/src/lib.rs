//! Epitrack Data Crate
//!
//! This crate resolves per-country COVID-19 case histories for the epitrack
//! application, preferring a live remote provider and falling back to a
//! bundled snapshot.
//!
//! # Overview
//!
//! The data crate supports:
//! - A fixed, configurable country catalog
//! - Live per-country series from the API Ninjas `/covid19` endpoint
//! - A bundled snapshot that stands in when the provider fails
//! - Memoized, tiered resolution with per-tier diagnostics
//! - Date, range and trailing-window queries over a resolved series
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     Catalog      |  (which countries can be picked)
//! +------------------+
//!          |
//!          v  CountryId
//! +------------------+     +------------------+
//! |     Resolver     | --> |    Provider      |  (live tier)
//! |  (memo → live →  |     +------------------+
//! |     snapshot)    | --> +------------------+
//! +------------------+     |  HistoryStore    |  (snapshot tier)
//!          |               +------------------+
//!          v  ResolvedDetail
//! +------------------+
//! |   SeriesQuery    |  (date, range, last n days)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`CountryId`] - Country identifier, compared without regard to case
//! - [`CountryRecord`] - One upstream row: country, region and its series
//! - [`TimeSeries`] - Date-ordered daily counters
//! - [`ResolvedDetail`] - The display-ready result of a resolution
//! - [`ResolutionError`] - The only errors a caller sees

pub mod catalog;
pub mod errors;
pub mod models;
pub mod preferences;
pub mod provider;
pub mod query;
pub mod resolver;
pub mod store;

// Re-export all public types from models
pub use models::{
    parse_records, CountryId, CountryRecord, DailyStat, DetailSource, ResolvedDetail, TimeSeries,
};

// Re-export error types
pub use errors::{ProviderError, ResolutionError, RetryClass, SnapshotError};

// Re-export catalog and query types
pub use catalog::{CatalogProvider, StaticCatalog, DEFAULT_COUNTRIES};
pub use query::{SeriesQuery, DEFAULT_WINDOW_DAYS};

// Re-export resolver types
pub use resolver::{
    CountryResolver, DetailCache, Resolution, ResolutionDiagnostics, ResolutionTier, RetryPolicy,
    TierOutcome,
};

// Re-export provider types
pub use provider::api_ninjas::ApiNinjasProvider;
pub use provider::{CaseDataProvider, ProviderConfig};

// Re-export store and preference types
pub use preferences::{InMemoryKeyValueStore, KeyValueStore, Preferences};
pub use store::{EmbeddedSnapshot, FileSnapshot, HistoryStore, SnapshotSource};
