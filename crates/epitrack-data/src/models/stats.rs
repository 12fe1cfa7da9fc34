use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Deserializer, Serialize};

/// Case counters for one date.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyStat {
    /// Cumulative confirmed cases
    #[serde(deserialize_with = "non_negative")]
    pub total: u64,

    /// Cases reported on this date
    #[serde(deserialize_with = "non_negative")]
    pub new: u64,
}

impl DailyStat {
    pub const ZERO: DailyStat = DailyStat { total: 0, new: 0 };

    pub fn new(total: u64, new: u64) -> Self {
        Self { total, new }
    }
}

/// Upstream corrections occasionally report negative counters; they are
/// clamped so every stored counter is >= 0.
fn non_negative<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = i64::deserialize(deserializer)?;
    Ok(value.max(0) as u64)
}

/// Date-keyed daily counters for one country record.
///
/// Keys are ISO `YYYY-MM-DD` strings. Because the format is fixed-width and
/// zero-padded, lexicographic key order is chronological order, and the
/// backing `BTreeMap` iterates in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries(BTreeMap<String, DailyStat>);

impl TimeSeries {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, date: impl Into<String>, stat: DailyStat) {
        self.0.insert(date.into(), stat);
    }

    pub fn get(&self, date: &str) -> Option<&DailyStat> {
        self.0.get(date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entry with the lexicographically greatest date.
    pub fn latest(&self) -> Option<(&str, &DailyStat)> {
        self.0
            .iter()
            .next_back()
            .map(|(date, stat)| (date.as_str(), stat))
    }

    /// Stats at the latest date, or zeros for an empty series.
    pub fn latest_stats(&self) -> DailyStat {
        self.latest().map(|(_, stat)| *stat).unwrap_or_default()
    }

    /// Entries in ascending date order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &DailyStat)> + '_ {
        self.0.iter().map(|(date, stat)| (date.as_str(), stat))
    }

    /// Entries with `start <= date <= end`, ascending. Empty when `start > end`.
    pub fn range<'a>(
        &'a self,
        start: &'a str,
        end: &'a str,
    ) -> impl DoubleEndedIterator<Item = (&'a str, &'a DailyStat)> + 'a {
        // BTreeMap::range panics on inverted bounds.
        let bounds = if start <= end {
            Some((Bound::Included(start), Bound::Included(end)))
        } else {
            None
        };
        bounds
            .into_iter()
            .flat_map(move |b| self.0.range::<str, _>(b))
            .map(|(date, stat)| (date.as_str(), stat))
    }
}

impl FromIterator<(String, DailyStat)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (String, DailyStat)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
