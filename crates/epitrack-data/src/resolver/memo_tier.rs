//! Memo tier - answers from previously resolved details.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::CountryId;

use super::cache::DetailCache;
use super::traits::{MissReason, ResolutionTier, TierOutcome};

/// Returns a cached detail unchanged, including degraded ones.
pub struct MemoTier {
    cache: Arc<DetailCache>,
}

impl MemoTier {
    pub fn new(cache: Arc<DetailCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ResolutionTier for MemoTier {
    fn name(&self) -> &'static str {
        "MEMO"
    }

    // Already cached.
    fn memoize(&self) -> bool {
        false
    }

    async fn attempt(&self, id: &CountryId) -> TierOutcome {
        match self.cache.get(id) {
            Some(detail) => TierOutcome::Success(detail),
            None => TierOutcome::miss(MissReason::NotCached),
        }
    }
}
