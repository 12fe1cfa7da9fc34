//! Fallback history store.
//!
//! This module provides the bundled snapshot used when the remote provider
//! is unreachable or incomplete:
//! - [`HistoryStore`]: lazily loaded, append-only record table
//! - [`Snapshot`]: the loaded records with the three lookup primitives
//! - [`SnapshotSource`]: where the raw document comes from (embedded or file)
//!
//! The store only answers lookups. Which lookup to try first, and what to do
//! when none match, is decided by the resolver's snapshot tier.

mod history_store;
mod source;

pub use history_store::{HistoryStore, Snapshot};
pub use source::{EmbeddedSnapshot, FileSnapshot, SnapshotSource};
