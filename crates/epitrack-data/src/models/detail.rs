use serde::Serialize;

use super::stats::{DailyStat, TimeSeries};
use super::types::CountryId;

/// Which source produced a resolved detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetailSource {
    /// The remote provider answered for the requested country.
    Live,
    /// The bundled snapshot stood in for the remote provider.
    Snapshot,
}

/// The externally visible artifact of resolving one country.
///
/// `title` and `id` are always the requested identifier, whichever record
/// supplied the data. `history` is authoritative for all downstream queries;
/// `latest_stats` is derived from its greatest date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDetail {
    pub id: CountryId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Region of the record that supplied the data, empty for country rows
    pub region: String,
    pub source: DetailSource,
    pub latest_date: Option<String>,
    pub latest_stats: DailyStat,
    pub history: TimeSeries,
}
