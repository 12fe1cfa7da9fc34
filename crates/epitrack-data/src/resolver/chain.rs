//! Country resolver - composite that walks the tiers in order.
//!
//! The resolver is the main entry point for turning a country id into a
//! [`ResolvedDetail`]. It tries each tier in order until one answers or
//! fails fatally:
//! 1. Memo (previously resolved details)
//! 2. Live (remote provider), skipped in offline mode
//! 3. Snapshot (bundled fallback store)

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::errors::ResolutionError;
use crate::models::{CountryId, ResolvedDetail};
use crate::provider::CaseDataProvider;
use crate::store::HistoryStore;

use super::cache::DetailCache;
use super::diagnostics::ResolutionDiagnostics;
use super::live_tier::{LiveTier, RetryPolicy};
use super::memo_tier::MemoTier;
use super::snapshot_tier::SnapshotTier;
use super::traits::{ResolutionTier, TierFailure, TierOutcome};

/// Result of one resolution.
pub type Resolution = Result<Arc<ResolvedDetail>, ResolutionError>;

/// Composite resolver that tries tiers in order.
///
/// Every answer, degraded ones included, is memoized under the requested id,
/// so a second resolution of the same id makes no provider call. Failures
/// are never memoized.
///
/// # Example
///
/// ```ignore
/// let provider = Arc::new(ApiNinjasProvider::new(ProviderConfig::new(api_key)));
/// let resolver = CountryResolver::new(provider, Arc::new(HistoryStore::embedded()));
///
/// let detail = resolver.resolve(&CountryId::from("Mexico")).await?;
/// // detail.title = "Mexico"
/// // detail.source = DetailSource::Live, or Snapshot when the provider failed
/// ```
pub struct CountryResolver {
    cache: Arc<DetailCache>,
    tiers: Vec<Box<dyn ResolutionTier>>,
}

impl CountryResolver {
    /// Create a resolver with the default tier order and retry policy.
    pub fn new(provider: Arc<dyn CaseDataProvider>, store: Arc<HistoryStore>) -> Self {
        Self::with_config(Some(provider), store, RetryPolicy::default())
    }

    /// Create a resolver that never calls a provider.
    pub fn offline(store: Arc<HistoryStore>) -> Self {
        Self::with_config(None, store, RetryPolicy::default())
    }

    /// Create a resolver with the default tier order.
    ///
    /// Without a provider the live tier is left out.
    pub fn with_config(
        provider: Option<Arc<dyn CaseDataProvider>>,
        store: Arc<HistoryStore>,
        retry: RetryPolicy,
    ) -> Self {
        let cache = Arc::new(DetailCache::new());
        let mut tiers: Vec<Box<dyn ResolutionTier>> = vec![Box::new(MemoTier::new(cache.clone()))];
        if let Some(provider) = provider {
            tiers.push(Box::new(LiveTier::new(provider, retry)));
        }
        tiers.push(Box::new(SnapshotTier::new(store)));

        Self { cache, tiers }
    }

    /// Create a resolver over an explicit tier list.
    ///
    /// Answers are still written to `cache`; include a [`MemoTier`] over the
    /// same cache to read them back.
    pub fn with_tiers(cache: Arc<DetailCache>, tiers: Vec<Box<dyn ResolutionTier>>) -> Self {
        Self { cache, tiers }
    }

    /// Append a tier after the existing ones.
    pub fn add_tier(&mut self, tier: Box<dyn ResolutionTier>) {
        self.tiers.push(tier);
    }

    pub fn cache(&self) -> &Arc<DetailCache> {
        &self.cache
    }

    /// Tier names in the order they are tried.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Resolve one country.
    pub async fn resolve(&self, id: &CountryId) -> Resolution {
        self.resolve_with_diagnostics(id).await.0
    }

    /// Resolve one country and report what each tier did.
    pub async fn resolve_with_diagnostics(
        &self,
        id: &CountryId,
    ) -> (Resolution, ResolutionDiagnostics) {
        let mut diagnostics = ResolutionDiagnostics::new();

        for tier in &self.tiers {
            match tier.attempt(id).await {
                TierOutcome::Success(detail) => {
                    diagnostics.record_success(tier.name());
                    debug!("Resolved '{}' via {}", id, tier.name());
                    self.remember(tier.as_ref(), id, &detail);
                    return (Ok(detail), diagnostics);
                }
                TierOutcome::Degraded(detail, substitution) => {
                    info!(
                        "Resolved '{}' via {} with substitute data ({:?})",
                        id,
                        tier.name(),
                        substitution
                    );
                    diagnostics.record_degraded(tier.name(), substitution);
                    self.remember(tier.as_ref(), id, &detail);
                    return (Ok(detail), diagnostics);
                }
                TierOutcome::Failed(TierFailure::Miss(reason)) => {
                    debug!("{} missed for '{}': {:?}", tier.name(), id, reason);
                    diagnostics.record_miss(tier.name(), reason);
                }
                TierOutcome::Failed(TierFailure::Fatal(error)) => {
                    diagnostics.record_fatal(tier.name(), error.to_string());
                    warn!(
                        "Resolution of '{}' failed. Diagnostics: {}",
                        id,
                        diagnostics.summary()
                    );
                    return (Err(error), diagnostics);
                }
            }
        }

        warn!(
            "No tier could resolve '{}'. Diagnostics: {}",
            id,
            diagnostics.summary()
        );
        (
            Err(ResolutionError::Unavailable {
                country: id.to_string(),
            }),
            diagnostics,
        )
    }

    /// Resolve several countries concurrently.
    ///
    /// Results are returned in input order.
    pub async fn resolve_all(&self, ids: &[CountryId]) -> Vec<(CountryId, Resolution)> {
        let results = join_all(ids.iter().map(|id| self.resolve(id))).await;
        ids.iter().cloned().zip(results).collect()
    }

    fn remember(&self, tier: &dyn ResolutionTier, id: &CountryId, detail: &Arc<ResolvedDetail>) {
        if tier.memoize() {
            self.cache.insert(id.clone(), detail.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::catalog::{CatalogProvider, StaticCatalog};
    use crate::errors::SnapshotError;
    use crate::models::DetailSource;
    use crate::resolver::testing::{record, MockProvider, Reply};
    use crate::resolver::{AttemptOutcome, MissReason, Substitution};
    use crate::store::SnapshotSource;

    struct BrokenSource;

    impl SnapshotSource for BrokenSource {
        fn describe(&self) -> String {
            "broken source".to_string()
        }

        fn read(&self) -> Result<String, SnapshotError> {
            Err(SnapshotError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    fn store() -> Arc<HistoryStore> {
        Arc::new(HistoryStore::from_records(vec![
            record("Canada", "Ontario", &[("2023-03-09", 40, 4)]),
            record(
                "Mexico",
                "Ciudad de Mexico",
                &[("2023-03-08", 18, 1), ("2023-03-09", 20, 2)],
            ),
        ]))
    }

    fn live_mexico() -> Reply {
        Reply::Records(vec![record(
            "Mexico",
            "",
            &[("2023-03-08", 7_483_444, 0), ("2023-03-09", 7_483_500, 56)],
        )])
    }

    fn resolver(provider: &Arc<MockProvider>, store: Arc<HistoryStore>) -> CountryResolver {
        CountryResolver::new(provider.clone(), store)
    }

    #[tokio::test]
    async fn test_live_success() {
        let provider = Arc::new(MockProvider::always(live_mexico()));
        let resolver = resolver(&provider, store());

        let detail = resolver.resolve(&CountryId::from("Mexico")).await.unwrap();

        assert_eq!(detail.title, "Mexico");
        assert_eq!(detail.source, DetailSource::Live);
        assert_eq!(detail.latest_stats.total, 7_483_500);
        assert_eq!(detail.history.len(), 2);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_second_resolve_makes_no_provider_call() {
        let provider = Arc::new(MockProvider::always(live_mexico()));
        let resolver = resolver(&provider, store());
        let id = CountryId::from("Mexico");

        let first = resolver.resolve(&id).await.unwrap();
        let second = resolver.resolve(&id).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_memo_ignores_case() {
        let provider = Arc::new(MockProvider::always(live_mexico()));
        let resolver = resolver(&provider, store());

        resolver.resolve(&CountryId::from("Mexico")).await.unwrap();
        let detail = resolver.resolve(&CountryId::from("MEXICO")).await.unwrap();

        assert_eq!(provider.calls(), 1);
        assert_eq!(detail.title, "Mexico");
    }

    #[tokio::test]
    async fn test_empty_provider_answer_falls_back_to_snapshot() {
        let provider = Arc::new(MockProvider::always(Reply::NoData));
        let resolver = resolver(&provider, store());

        let detail = resolver.resolve(&CountryId::from("Mexico")).await.unwrap();

        assert_eq!(detail.source, DetailSource::Snapshot);
        assert_eq!(detail.region, "Ciudad de Mexico");
        assert_eq!(detail.latest_stats.total, 20);
    }

    #[tokio::test]
    async fn test_transport_failure_still_succeeds() {
        let provider = Arc::new(MockProvider::always(Reply::Unreachable));
        let resolver = resolver(&provider, store());

        let (result, diagnostics) = resolver
            .resolve_with_diagnostics(&CountryId::from("Canada"))
            .await;

        let detail = result.unwrap();
        assert_eq!(detail.title, "Canada");
        assert_eq!(detail.region, "Ontario");
        assert_eq!(diagnostics.answered_by(), Some("SNAPSHOT"));
        assert_eq!(
            diagnostics.summary(),
            "MEMO: MISS (NotCached) -> LIVE: MISS (Provider { message: \"Provider unreachable: MOCK - connection refused\" }) -> SNAPSHOT: DEGRADED (Region(\"Ontario\"))"
        );
    }

    #[tokio::test]
    async fn test_malformed_answer_falls_back_to_snapshot() {
        let provider = Arc::new(MockProvider::always(Reply::Malformed));
        let resolver = resolver(&provider, store());

        let detail = resolver.resolve(&CountryId::from("Mexico")).await.unwrap();
        assert_eq!(detail.source, DetailSource::Snapshot);
    }

    #[tokio::test]
    async fn test_live_record_without_history_falls_back_to_snapshot() {
        let provider = Arc::new(MockProvider::always(Reply::Records(vec![record(
            "Mexico",
            "",
            &[],
        )])));
        let resolver = resolver(&provider, store());

        let (result, diagnostics) = resolver
            .resolve_with_diagnostics(&CountryId::from("Mexico"))
            .await;

        assert_eq!(result.unwrap().source, DetailSource::Snapshot);
        assert_eq!(diagnostics.misses()[1], ("LIVE", &MissReason::EmptySeries));
    }

    #[tokio::test]
    async fn test_unknown_country_gets_first_snapshot_record() {
        let provider = Arc::new(MockProvider::always(Reply::NoData));
        let resolver = resolver(&provider, store());

        let (result, diagnostics) = resolver
            .resolve_with_diagnostics(&CountryId::from("Atlantis"))
            .await;

        let detail = result.unwrap();
        assert_eq!(detail.title, "Atlantis");
        assert_eq!(detail.region, "Ontario");
        assert_eq!(
            diagnostics.attempts.last().unwrap().outcome,
            AttemptOutcome::Degraded(Substitution::FirstRecord)
        );
    }

    #[tokio::test]
    async fn test_degraded_answer_is_memoized() {
        let provider = Arc::new(MockProvider::always(Reply::Unreachable));
        let resolver = resolver(&provider, store());
        let id = CountryId::from("Canada");

        resolver.resolve(&id).await.unwrap();
        let (result, diagnostics) = resolver.resolve_with_diagnostics(&id).await;

        assert_eq!(result.unwrap().source, DetailSource::Snapshot);
        assert_eq!(diagnostics.answered_by(), Some("MEMO"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_is_unavailable() {
        let provider = Arc::new(MockProvider::always(Reply::Unreachable));
        let resolver = resolver(&provider, Arc::new(HistoryStore::from_records(Vec::new())));

        let result = resolver.resolve(&CountryId::from("Mexico")).await;

        assert_eq!(
            result.unwrap_err(),
            ResolutionError::Unavailable {
                country: "Mexico".to_string()
            }
        );
        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failing_store_is_no_fallback_data() {
        let provider = Arc::new(MockProvider::always(Reply::NoData));
        let resolver = resolver(&provider, Arc::new(HistoryStore::new(BrokenSource)));

        let result = resolver.resolve(&CountryId::from("Mexico")).await;

        assert!(matches!(
            result,
            Err(ResolutionError::NoFallbackData { .. })
        ));
    }

    #[tokio::test]
    async fn test_failing_store_is_not_read_when_live_answers() {
        let provider = Arc::new(MockProvider::always(live_mexico()));
        let resolver = resolver(&provider, Arc::new(HistoryStore::new(BrokenSource)));

        assert!(resolver.resolve(&CountryId::from("Mexico")).await.is_ok());
    }

    #[tokio::test]
    async fn test_all_tiers_missing_is_unavailable() {
        let provider = Arc::new(MockProvider::always(Reply::Unreachable));
        let cache = Arc::new(DetailCache::new());
        let tiers: Vec<Box<dyn ResolutionTier>> = vec![
            Box::new(MemoTier::new(cache.clone())),
            Box::new(LiveTier::new(provider.clone(), RetryPolicy::default())),
        ];
        let resolver = CountryResolver::with_tiers(cache, tiers);

        let (result, diagnostics) = resolver
            .resolve_with_diagnostics(&CountryId::from("Peru"))
            .await;

        assert!(matches!(result, Err(ResolutionError::Unavailable { .. })));
        assert_eq!(diagnostics.misses().len(), 2);
    }

    #[tokio::test]
    async fn test_offline_resolver_skips_live_tier() {
        let resolver = CountryResolver::offline(store());

        assert_eq!(resolver.tier_names(), vec!["MEMO", "SNAPSHOT"]);
        let detail = resolver.resolve(&CountryId::from("Mexico")).await.unwrap();
        assert_eq!(detail.source, DetailSource::Snapshot);
    }

    #[tokio::test]
    async fn test_retry_policy_is_applied() {
        let provider = Arc::new(MockProvider::new(vec![Reply::Unreachable, live_mexico()]));
        let resolver = CountryResolver::with_config(
            Some(provider.clone() as Arc<dyn CaseDataProvider>),
            store(),
            RetryPolicy {
                max_attempts: 2,
                backoff: Duration::from_millis(1),
            },
        );

        let detail = resolver.resolve(&CountryId::from("Mexico")).await.unwrap();

        assert_eq!(detail.source, DetailSource::Live);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_catalog_resolves_from_snapshot_when_provider_unreachable() {
        let provider = Arc::new(MockProvider::always(Reply::Unreachable));
        let resolver = resolver(&provider, Arc::new(HistoryStore::embedded()));

        for id in StaticCatalog::new().list_countries() {
            let (result, diagnostics) = resolver.resolve_with_diagnostics(&id).await;
            let detail = result.unwrap();

            assert_eq!(detail.title, id.as_str());
            assert!(!detail.history.is_empty(), "empty history for {}", id);
            assert_eq!(detail.source, DetailSource::Snapshot);
            assert!(
                matches!(
                    diagnostics.attempts.last().unwrap().outcome,
                    AttemptOutcome::Degraded(Substitution::Region(_))
                ),
                "{} did not use its substitution region",
                id
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_input_order() {
        let provider = Arc::new(MockProvider::always(Reply::NoData));
        let resolver = resolver(&provider, store());
        let ids = vec![
            CountryId::from("Mexico"),
            CountryId::from("Canada"),
            CountryId::from("Atlantis"),
        ];

        let results = resolver.resolve_all(&ids).await;

        assert_eq!(results.len(), 3);
        let titles: Vec<_> = results
            .iter()
            .map(|(_, r)| r.as_ref().unwrap().title.clone())
            .collect();
        assert_eq!(titles, vec!["Mexico", "Canada", "Atlantis"]);
        assert_eq!(results[1].1.as_ref().unwrap().region, "Ontario");
    }
}
