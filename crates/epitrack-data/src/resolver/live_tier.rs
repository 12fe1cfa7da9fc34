//! Live tier - asks the remote provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::errors::{ProviderError, RetryClass};
use crate::models::{CountryId, DetailSource};
use crate::provider::CaseDataProvider;

use super::mapping::map_record;
use super::traits::{MissReason, ResolutionTier, TierOutcome};

/// Default pause between live attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// How often the live tier calls the provider for one resolution.
///
/// Only `Unreachable` errors are retried. The default of one attempt keeps a
/// resolution to a single outbound call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total calls per resolution; values below 1 are treated as 1
    pub max_attempts: u32,
    /// Fixed pause between calls
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

/// Maps the provider's first record for the requested country.
///
/// Every provider error is a miss; none of them reach the caller.
pub struct LiveTier {
    provider: Arc<dyn CaseDataProvider>,
    retry: RetryPolicy,
}

impl LiveTier {
    pub fn new(provider: Arc<dyn CaseDataProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    fn log_failure(&self, id: &CountryId, error: &ProviderError) {
        warn!(
            "Live fetch for '{}' from {} failed: {}",
            id,
            self.provider.id(),
            error
        );
        if let ProviderError::MalformedResponse { payload, .. } = error {
            debug!("Unparseable payload for '{}': {}", id, payload);
        }
    }
}

#[async_trait]
impl ResolutionTier for LiveTier {
    fn name(&self) -> &'static str {
        "LIVE"
    }

    async fn attempt(&self, id: &CountryId) -> TierOutcome {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.provider.fetch_country(id).await {
                Ok(records) => {
                    let Some(first) = records.into_iter().next() else {
                        return TierOutcome::miss(MissReason::Provider {
                            message: "empty record list".to_string(),
                        });
                    };
                    if first.series.is_empty() {
                        debug!("Live record for '{}' has no history", id);
                        return TierOutcome::miss(MissReason::EmptySeries);
                    }
                    return TierOutcome::Success(Arc::new(map_record(
                        id,
                        first,
                        DetailSource::Live,
                    )));
                }
                Err(error) => {
                    if error.retry_class() == RetryClass::WithBackoff && attempt < max_attempts {
                        debug!(
                            "Live attempt {}/{} for '{}' failed: {}; retrying in {:?}",
                            attempt, max_attempts, id, error, self.retry.backoff
                        );
                        tokio::time::sleep(self.retry.backoff).await;
                        attempt += 1;
                        continue;
                    }
                    self.log_failure(id, &error);
                    return TierOutcome::miss(MissReason::Provider {
                        message: error.to_string(),
                    });
                }
            }
        }
    }
}
