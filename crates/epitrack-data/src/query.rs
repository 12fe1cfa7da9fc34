//! Read-only queries over one country's history.
//!
//! Dates are `YYYY-MM-DD` strings and compare lexicographically, which for
//! that format matches calendar order.

use chrono::{Days, NaiveDate};

use crate::errors::ResolutionError;
use crate::models::{DailyStat, ResolvedDetail, TimeSeries};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days covered by the window a detail view opens on.
pub const DEFAULT_WINDOW_DAYS: u64 = 7;

/// Queries over a borrowed series.
#[derive(Clone, Copy, Debug)]
pub struct SeriesQuery<'a> {
    series: &'a TimeSeries,
}

impl<'a> SeriesQuery<'a> {
    pub fn new(series: &'a TimeSeries) -> Self {
        Self { series }
    }

    /// Stats recorded on exactly `date`, or zeros if there is no entry.
    pub fn stats_on_date(&self, date: &str) -> DailyStat {
        self.series.get(date).copied().unwrap_or_default()
    }

    /// Aggregate over `start <= date <= end`.
    ///
    /// `new` is summed over the entries present in the range. `total` is the
    /// cumulative figure at the latest entry in the range, since totals are
    /// running counts and summing them would double count. Both are zero
    /// when no entry falls in the range.
    pub fn stats_over_range(&self, start: &str, end: &str) -> Result<DailyStat, ResolutionError> {
        if start > end {
            return Err(ResolutionError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(self
            .series
            .range(start, end)
            .fold(DailyStat::ZERO, |acc, (_, stat)| DailyStat {
                total: stat.total,
                new: acc.new.saturating_add(stat.new),
            }))
    }

    /// `(date, total)` for the `n` most recent entries, oldest first.
    pub fn latest_n_days(&self, n: usize) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        let series = self.series;
        let skip = series.len().saturating_sub(n);
        series
            .iter()
            .skip(skip)
            .map(|(date, stat)| (date, stat.total))
    }

    /// `(start, end)` where `end` is the latest date and `start` lies `days`
    /// calendar days before it.
    ///
    /// `None` for an empty series or when the latest key is not a date.
    pub fn default_window(&self, days: u64) -> Option<(String, String)> {
        let (latest, _) = self.series.latest()?;
        let end = NaiveDate::parse_from_str(latest, DATE_FORMAT).ok()?;
        let start = end.checked_sub_days(Days::new(days))?;
        Some((start.format(DATE_FORMAT).to_string(), latest.to_string()))
    }
}

impl ResolvedDetail {
    /// Queries over this detail's history.
    pub fn query(&self) -> SeriesQuery<'_> {
        SeriesQuery::new(&self.history)
    }
}
