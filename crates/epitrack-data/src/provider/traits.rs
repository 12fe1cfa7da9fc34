//! Case data provider trait definitions.
//!
//! This module defines the core `CaseDataProvider` trait that the remote
//! data source implements.

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::{CountryId, CountryRecord};

/// Trait for remote case data providers.
///
/// Implement this trait to plug a new upstream source into the resolver.
/// A provider performs exactly one request per call and never retries;
/// retrying is the resolver's job.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use epitrack_data::provider::CaseDataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl CaseDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_country(
///         &self,
///         country: &CountryId,
///     ) -> Result<Vec<CountryRecord>, ProviderError> {
///         // ... one request, parse, map errors
///     }
/// }
/// ```
#[async_trait]
pub trait CaseDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Used for logging and diagnostics.
    fn id(&self) -> &'static str;

    /// Fetch every record the provider holds for a country.
    ///
    /// # Returns
    ///
    /// At least one record on success. An empty answer is reported as
    /// [`ProviderError::NoData`] rather than an empty vector.
    async fn fetch_country(&self, country: &CountryId)
        -> Result<Vec<CountryRecord>, ProviderError>;
}
