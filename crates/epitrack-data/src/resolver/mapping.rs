//! Record → detail mapping shared by the live and snapshot tiers.

use crate::models::{CountryId, CountryRecord, DetailSource, ResolvedDetail};

use super::country_tables::image_url;

/// Build the detail for `id` from `record`.
///
/// The title is always the requested id, even when the record belongs to a
/// different country.
pub fn map_record(id: &CountryId, record: CountryRecord, source: DetailSource) -> ResolvedDetail {
    let latest_date = record.series.latest().map(|(date, _)| date.to_string());
    let latest_stats = record.series.latest_stats();
    let description = describe(&record, latest_date.as_deref(), source);

    ResolvedDetail {
        id: id.clone(),
        title: id.to_string(),
        description,
        image_url: image_url(id),
        region: record.region_name,
        source,
        latest_date,
        latest_stats,
        history: record.series,
    }
}

fn describe(record: &CountryRecord, latest_date: Option<&str>, source: DetailSource) -> String {
    let date = latest_date.unwrap_or("unknown date");
    match source {
        DetailSource::Live => format!("COVID-19 statistics for {}", date),
        DetailSource::Snapshot if record.region_name.is_empty() => format!(
            "COVID-19 statistics for {} (offline snapshot: {})",
            date, record.country_name
        ),
        DetailSource::Snapshot => format!(
            "COVID-19 statistics for {} (offline snapshot: {}, {})",
            date, record.region_name, record.country_name
        ),
    }
}
