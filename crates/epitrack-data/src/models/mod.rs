//! Epidemiological data models
//!
//! This module contains the core data types of the resolution pipeline:
//! - `types` - Identifiers (CountryId)
//! - `stats` - Daily counters and the date-keyed series (DailyStat, TimeSeries)
//! - `record` - Upstream rows and their wire formats (CountryRecord)
//! - `detail` - The resolved, display-ready artifact (ResolvedDetail)

mod detail;
mod record;
mod stats;
mod types;

pub use detail::{DetailSource, ResolvedDetail};
pub use record::{parse_records, CountryRecord};
pub use stats::{DailyStat, TimeSeries};
pub use types::CountryId;
