//! Country resolution.
//!
//! This module turns a country id into a [`ResolvedDetail`](crate::models::ResolvedDetail)
//! by walking an ordered list of tiers.
//!
//! # Architecture
//!
//! The resolver uses a chain of responsibility pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CountryResolver                         │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 1. Memo tier                                            │ │
//! │  │    - Previously resolved details, keyed by request id   │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 2. Live tier (absent in offline mode)                   │ │
//! │  │    - Remote provider, first record, bounded retries     │ │
//! │  │    - Every provider error is a miss                     │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! │                           │ miss                             │
//! │                           ▼                                  │
//! │  ┌────────────────────────────────────────────────────────┐ │
//! │  │ 3. Snapshot tier                                        │ │
//! │  │    - Substitution region → country name → first record  │ │
//! │  │    - Load failure or empty store is fatal               │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every tier reports a [`TierOutcome`]. Success and degraded answers end the
//! walk and are memoized; a miss moves on; a fatal failure ends the walk with
//! its error. If every tier misses the result is `Unavailable`.

mod cache;
mod chain;
mod country_tables;
mod diagnostics;
mod live_tier;
mod mapping;
mod memo_tier;
mod snapshot_tier;
mod traits;

#[cfg(test)]
mod testing;

// Re-export main types
pub use cache::DetailCache;
pub use chain::{CountryResolver, Resolution};
pub use country_tables::{fallback_region, flag_code, image_url};
pub use diagnostics::{AttemptOutcome, ResolutionDiagnostics, TierAttempt};
pub use live_tier::{LiveTier, RetryPolicy, DEFAULT_BACKOFF};
pub use mapping::map_record;
pub use memo_tier::MemoTier;
pub use snapshot_tier::{RegionSubstitutions, SnapshotTier};
pub use traits::{MissReason, ResolutionTier, Substitution, TierFailure, TierOutcome};
