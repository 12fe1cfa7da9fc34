//! Snapshot tier - answers from the bundled fallback store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::errors::ResolutionError;
use crate::models::{CountryId, CountryRecord, DetailSource};
use crate::store::{HistoryStore, Snapshot};

use super::country_tables::substitution_entries;
use super::mapping::map_record;
use super::traits::{MissReason, ResolutionTier, Substitution, TierOutcome};

/// Country → region whose snapshot record stands in for it.
#[derive(Clone, Debug, Default)]
pub struct RegionSubstitutions {
    regions: HashMap<CountryId, String>,
}

impl RegionSubstitutions {
    /// The table compiled into the crate.
    pub fn builtin() -> Self {
        substitution_entries()
            .fold(Self::default(), |table, (country, region)| {
                table.with(country, region)
            })
    }

    pub fn with(mut self, country: impl Into<CountryId>, region: impl Into<String>) -> Self {
        self.regions.insert(country.into(), region.into());
        self
    }

    pub fn region_for(&self, id: &CountryId) -> Option<&str> {
        self.regions.get(id).map(String::as_str)
    }
}

/// Picks a stand-in record from the snapshot.
///
/// Selection order:
/// 1. the record whose region the substitution table names for `id`
/// 2. the first record whose country name matches `id`
/// 3. the first record of the snapshot, whatever country it belongs to
///
/// The last step trades precision for availability: a non-empty snapshot
/// always produces an answer. Every answer is `Degraded`.
pub struct SnapshotTier {
    store: Arc<HistoryStore>,
    substitutions: RegionSubstitutions,
}

impl SnapshotTier {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self::with_substitutions(store, RegionSubstitutions::builtin())
    }

    pub fn with_substitutions(store: Arc<HistoryStore>, substitutions: RegionSubstitutions) -> Self {
        Self {
            store,
            substitutions,
        }
    }

    /// The record standing in for `id`, and how it was chosen.
    pub fn select<'a>(
        &self,
        snapshot: &'a Snapshot,
        id: &CountryId,
    ) -> Option<(&'a CountryRecord, Substitution)> {
        if let Some(region) = self.substitutions.region_for(id) {
            if let Some(record) = snapshot.find_by_region(region) {
                return Some((record, Substitution::Region(region.to_string())));
            }
        }
        if let Some(record) = snapshot.find_by_country_name(id) {
            return Some((record, Substitution::CountryName));
        }
        snapshot.first().map(|record| (record, Substitution::FirstRecord))
    }

    /// Load the store. Until the first success the source read (file I/O
    /// for [`FileSnapshot`](crate::store::FileSnapshot)) runs on the
    /// blocking pool.
    async fn load_snapshot(&self) -> Result<Snapshot, String> {
        if self.store.is_loaded() {
            return self.store.load().map_err(|e| e.to_string());
        }

        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.load()).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("Snapshot load task failed: {}", e)),
        }
    }
}

#[async_trait]
impl ResolutionTier for SnapshotTier {
    fn name(&self) -> &'static str {
        "SNAPSHOT"
    }

    async fn attempt(&self, id: &CountryId) -> TierOutcome {
        let snapshot = match self.load_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(message) => {
                warn!(
                    "Fallback store unavailable while resolving '{}': {}",
                    id, message
                );
                return TierOutcome::fatal(ResolutionError::NoFallbackData { message });
            }
        };

        let Some((record, substitution)) = self.select(&snapshot, id) else {
            warn!("Fallback store is empty; no data for '{}'", id);
            return TierOutcome::fatal(ResolutionError::Unavailable {
                country: id.to_string(),
            });
        };

        if record.series.is_empty() {
            return TierOutcome::miss(MissReason::EmptySeries);
        }

        if substitution == Substitution::FirstRecord {
            info!(
                "No snapshot record for '{}'; standing in with {} / {}",
                id, record.country_name, record.region_name
            );
        }

        let detail = map_record(id, record.clone(), DetailSource::Snapshot);
        TierOutcome::Degraded(Arc::new(detail), substitution)
    }
}
