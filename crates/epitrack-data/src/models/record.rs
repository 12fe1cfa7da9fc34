use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::stats::{DailyStat, TimeSeries};

/// Epoch values above this are treated as milliseconds (year 5138 in seconds).
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// One upstream row: the series of a country, or of one of its regions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountryRecord {
    pub country_name: String,
    /// Empty for country-level aggregate rows
    pub region_name: String,
    pub series: TimeSeries,
}

impl CountryRecord {
    pub fn new(
        country_name: impl Into<String>,
        region_name: impl Into<String>,
        series: TimeSeries,
    ) -> Self {
        Self {
            country_name: country_name.into(),
            region_name: region_name.into(),
            series,
        }
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// A row as returned by the provider or stored in the snapshot.
#[derive(Debug, Deserialize)]
struct RawRecord {
    country: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    cases: Option<RawCases>,
    /// Last update time of legacy flat rows (Unix seconds or milliseconds)
    #[serde(default)]
    updated: Option<serde_json::Value>,
}

/// The two shapes `cases` has had upstream.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCases {
    /// Canonical shape: `{"2023-03-01": {"total": 10, "new": 1}, ...}`
    Daily(TimeSeries),
    /// Legacy shape: a single cumulative counter
    Flat(i64),
}

impl From<RawRecord> for CountryRecord {
    fn from(raw: RawRecord) -> Self {
        let series = match raw.cases {
            Some(RawCases::Daily(series)) => series,
            Some(RawCases::Flat(total)) => {
                let date = raw
                    .updated
                    .as_ref()
                    .and_then(serde_json::Value::as_i64)
                    .and_then(date_from_epoch)
                    .unwrap_or_else(|| Utc::now().date_naive());
                let mut series = TimeSeries::new();
                series.insert(
                    date.format("%Y-%m-%d").to_string(),
                    DailyStat::new(total.max(0) as u64, 0),
                );
                series
            }
            None => TimeSeries::new(),
        };

        CountryRecord {
            country_name: raw.country,
            region_name: raw.region.unwrap_or_default(),
            series,
        }
    }
}

fn date_from_epoch(value: i64) -> Option<NaiveDate> {
    let timestamp = if value.abs() >= MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(value)
    } else {
        DateTime::<Utc>::from_timestamp(value, 0)
    };
    timestamp.map(|t| t.date_naive())
}

/// Parse a JSON array of records in either the per-date or the flat shape.
pub fn parse_records(body: &str) -> Result<Vec<CountryRecord>, serde_json::Error> {
    let raw: Vec<RawRecord> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(CountryRecord::from).collect())
}
