//! Resolution traits for the epitrack data crate.
//!
//! Defines the tier abstraction the resolver walks in order, and the tagged
//! outcome each tier reports.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ResolutionError;
use crate::models::{CountryId, ResolvedDetail};

/// How a degraded answer was selected from the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Substitution {
    /// The substitution table named a region and a record with it exists.
    Region(String),
    /// A record whose country name matches the requested id.
    CountryName,
    /// Nothing matched; the first record in the snapshot was used.
    FirstRecord,
}

/// Why a tier could not answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MissReason {
    /// No memoized detail for the id.
    NotCached,
    /// The provider call failed; the message is kept for diagnostics.
    Provider { message: String },
    /// The selected record carries no history.
    EmptySeries,
}

/// A tier that could not answer, and whether the waterfall may continue.
#[derive(Clone, Debug)]
pub enum TierFailure {
    /// The next tier is tried.
    Miss(MissReason),
    /// Resolution stops with this error.
    Fatal(ResolutionError),
}

/// Result of one tier attempt.
#[derive(Clone, Debug)]
pub enum TierOutcome {
    /// Answered with data for the requested country.
    Success(Arc<ResolvedDetail>),
    /// Answered with stand-in data.
    Degraded(Arc<ResolvedDetail>, Substitution),
    /// Not answered.
    Failed(TierFailure),
}

impl TierOutcome {
    pub(crate) fn miss(reason: MissReason) -> Self {
        Self::Failed(TierFailure::Miss(reason))
    }

    pub(crate) fn fatal(error: ResolutionError) -> Self {
        Self::Failed(TierFailure::Fatal(error))
    }
}

/// Individual tier in the resolution waterfall.
///
/// Tiers are tried in order until one answers or fails fatally. A miss means
/// this tier cannot handle the request and the next tier is tried.
#[async_trait]
pub trait ResolutionTier: Send + Sync {
    /// Short label used in diagnostics and logs.
    fn name(&self) -> &'static str;

    /// Whether answers from this tier are written to the memo cache.
    fn memoize(&self) -> bool {
        true
    }

    /// Attempt to resolve `id`.
    async fn attempt(&self, id: &CountryId) -> TierOutcome;
}
