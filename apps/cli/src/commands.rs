//! Command handlers. Each returns the text to print on stdout.

use std::fmt::Write;

use anyhow::Result;
use epitrack_data::{
    CatalogProvider, CountryId, DailyStat, DetailSource, Resolution, ResolvedDetail,
    DEFAULT_WINDOW_DAYS,
};
use serde_json::json;

use crate::main_lib::AppState;

/// Shown for a country that could not be resolved; the cause is only logged.
const NO_DATA: &str = "no data";

/// Which stats the detail view reports besides the latest figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Day(String),
    Range { start: String, end: String },
    /// The trailing week ending on the latest date
    DefaultWindow,
}

impl Selection {
    pub fn from_args(date: Option<String>, from: Option<String>, to: Option<String>) -> Self {
        match (date, from, to) {
            (Some(day), _, _) => Self::Day(day),
            (None, Some(start), Some(end)) => Self::Range { start, end },
            _ => Self::DefaultWindow,
        }
    }
}

pub fn list(state: &AppState, search: Option<&str>, as_json: bool) -> Result<String> {
    let countries = match search {
        Some(query) => state.catalog.search(query),
        None => state.catalog.list_countries(),
    };

    if as_json {
        return Ok(serde_json::to_string_pretty(&countries)?);
    }
    if countries.is_empty() {
        return Ok(format!("No countries match '{}'", search.unwrap_or_default()));
    }
    Ok(countries
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("\n"))
}

pub async fn show(
    state: &AppState,
    country: Option<String>,
    selection: Selection,
    last: usize,
    as_json: bool,
) -> Result<String> {
    let id = match country {
        Some(name) => CountryId::from(name),
        None => match state.preferences.last_viewed_country() {
            Some(id) => id,
            None => state
                .catalog
                .list_countries()
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("The country catalog is empty"))?,
        },
    };

    let detail = match state.resolver.resolve(&id).await {
        Ok(detail) => detail,
        Err(e) => {
            tracing::warn!("Resolution of '{}' failed: {}", id, e);
            return Ok(format!("No data for {}", id));
        }
    };
    state.preferences.set_last_viewed_country(&id);

    let query = detail.query();
    let (label, stats) = match &selection {
        Selection::Day(day) => (day.clone(), Some(query.stats_on_date(day))),
        Selection::Range { start, end } => (
            format!("{} to {}", start, end),
            Some(query.stats_over_range(start, end)?),
        ),
        Selection::DefaultWindow => match query.default_window(DEFAULT_WINDOW_DAYS) {
            Some((start, end)) => (
                format!("{} to {}", start, end),
                Some(query.stats_over_range(&start, &end)?),
            ),
            None => (String::new(), None),
        },
    };
    let recent: Vec<(&str, u64)> = query.latest_n_days(last).collect();

    if as_json {
        let body = json!({
            "detail": &*detail,
            "selection": stats.map(|s| json!({ "label": label, "stats": s })),
            "recent": recent
                .iter()
                .map(|(date, total)| json!({ "date": date, "total": total }))
                .collect::<Vec<_>>(),
        });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    let mut out = String::new();
    writeln!(out, "{}", detail.title)?;
    writeln!(out, "{}", detail.description)?;
    writeln!(out, "Source: {}", source_label(&detail))?;
    writeln!(out, "Flag: {}", detail.image_url)?;
    writeln!(
        out,
        "Latest ({}): {}",
        detail.latest_date.as_deref().unwrap_or("n/a"),
        format_stat(&detail.latest_stats)
    )?;
    if let Some(stats) = stats {
        writeln!(out, "{}: {}", label, format_stat(&stats))?;
    }
    writeln!(out, "Last {} days:", recent.len())?;
    for (date, total) in recent {
        writeln!(out, "  {}  {}", date, total)?;
    }
    Ok(out.trim_end().to_string())
}

pub async fn compare(state: &AppState, countries: Vec<String>, as_json: bool) -> Result<String> {
    let ids: Vec<CountryId> = countries.into_iter().map(CountryId::from).collect();
    let results = state.resolver.resolve_all(&ids).await;
    for (id, result) in &results {
        if let Err(e) = result {
            tracing::warn!("Resolution of '{}' failed: {}", id, e);
        }
    }

    if as_json {
        let rows: Vec<_> = results
            .iter()
            .map(|(id, result)| match result {
                Ok(detail) => json!({ "country": id, "detail": &**detail }),
                Err(_) => json!({ "country": id, "error": NO_DATA }),
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&rows)?);
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<16} {:<9} {:<11} {:>12} {:>8}",
        "Country", "Source", "Date", "Total", "New"
    )?;
    for (id, result) in &results {
        writeln!(out, "{}", comparison_row(id, result))?;
    }
    Ok(out.trim_end().to_string())
}

fn comparison_row(id: &CountryId, result: &Resolution) -> String {
    match result {
        Ok(detail) => format!(
            "{:<16} {:<9} {:<11} {:>12} {:>8}",
            id.as_str(),
            source_label(detail),
            detail.latest_date.as_deref().unwrap_or("n/a"),
            detail.latest_stats.total,
            detail.latest_stats.new
        ),
        Err(_) => format!("{:<16} {}", id.as_str(), NO_DATA),
    }
}

fn source_label(detail: &ResolvedDetail) -> &'static str {
    match detail.source {
        DetailSource::Live => "live",
        DetailSource::Snapshot => "snapshot",
    }
}

fn format_stat(stat: &DailyStat) -> String {
    format!("total {}, new {}", stat.total, stat.new)
}
