//! Error types and retry classification for the epitrack data crate.
//!
//! This module provides:
//! - [`ProviderError`]: failures of a single remote provider call
//! - [`SnapshotError`]: failures loading the bundled snapshot
//! - [`ResolutionError`]: the only errors callers of the resolver and the
//!   series queries ever see
//! - [`RetryClass`]: classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during a single remote provider call.
///
/// These never leave the resolver: every variant makes the live tier miss and
/// the waterfall continue with the snapshot tier.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider could not be reached, timed out, or answered with a
    /// non-success status.
    #[error("Provider unreachable: {provider} - {message}")]
    Unreachable {
        /// The provider that failed
        provider: String,
        /// Transport-level description of the failure
        message: String,
    },

    /// The provider answered but the body is not a sequence of records.
    ///
    /// The raw payload is kept for diagnostic logging only.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider that returned the body
        provider: String,
        /// The parser error
        message: String,
        /// The raw response body
        payload: String,
    },

    /// The provider answered with an empty sequence of records.
    #[error("No data from {provider} for {country}")]
    NoData {
        /// The provider that returned no rows
        provider: String,
        /// The requested country
        country: String,
    },
}

impl ProviderError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use epitrack_data::errors::{ProviderError, RetryClass};
    ///
    /// let error = ProviderError::Unreachable {
    ///     provider: "API_NINJAS".to_string(),
    ///     message: "connection refused".to_string(),
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Unreachable { .. } => RetryClass::WithBackoff,
            Self::MalformedResponse { .. } | Self::NoData { .. } => RetryClass::NextTier,
        }
    }
}

/// Errors that can occur while loading the bundled snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("Snapshot read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot document is not a sequence of records.
    #[error("Snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced to callers of the resolver and the series queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Every tier was exhausted, or the fallback store holds no records.
    #[error("No data available for {country}")]
    Unavailable {
        /// The requested country
        country: String,
    },

    /// The fallback store could not be loaded.
    #[error("Fallback data could not be loaded: {message}")]
    NoFallbackData {
        /// Description of the load failure
        message: String,
    },

    /// A range query was given a start date after its end date.
    #[error("Invalid range: {start} is after {end}")]
    InvalidRange {
        /// Requested start date
        start: String,
        /// Requested end date
        end: String,
    },
}
