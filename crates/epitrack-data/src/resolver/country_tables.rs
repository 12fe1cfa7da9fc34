//! JSON-driven country metadata.
//!
//! Loads `country_tables.json` at compile time via `include_str!` and builds
//! case-insensitive lookup indexes once via `lazy_static`:
//! - the region substitution table used by the snapshot tier
//! - ISO 3166-1 alpha-2 codes used to build flag image URLs

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Deserialize;

use crate::models::CountryId;

/// Flag images are served at this width.
const FLAG_URL_BASE: &str = "https://flagcdn.com/w320";

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CountryCatalog {
    countries: Vec<CountryEntry>,
    default_flag: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CountryEntry {
    name: String,
    flag: String,
    #[serde(default)]
    fallback_region: Option<String>,
}

// ── Tables with pre-built indexes ────────────────────────────────────────────

struct CountryTables {
    /// lowercased country name → region of the stand-in snapshot record
    region_by_country: HashMap<String, String>,
    /// lowercased country name → alpha-2 code
    flag_by_country: HashMap<String, String>,
    default_flag: String,
}

lazy_static! {
    static ref TABLES: CountryTables = CountryTables::load();
}

impl CountryTables {
    fn load() -> Self {
        let json = include_str!("country_tables.json");
        let catalog: CountryCatalog =
            serde_json::from_str(json).expect("country_tables.json must be valid");

        let mut region_by_country = HashMap::new();
        let mut flag_by_country = HashMap::new();
        for entry in catalog.countries {
            let key = entry.name.to_lowercase();
            if let Some(region) = entry.fallback_region {
                region_by_country.insert(key.clone(), region);
            }
            flag_by_country.insert(key, entry.flag);
        }

        Self {
            region_by_country,
            flag_by_country,
            default_flag: catalog.default_flag,
        }
    }
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Region whose snapshot record stands in for `country`, if one is configured.
pub fn fallback_region(country: &CountryId) -> Option<&'static str> {
    TABLES
        .region_by_country
        .get(&country.as_str().to_lowercase())
        .map(String::as_str)
}

/// Alpha-2 flag code for `country`, or the generic code for unknown countries.
pub fn flag_code(country: &CountryId) -> &'static str {
    TABLES
        .flag_by_country
        .get(&country.as_str().to_lowercase())
        .map(String::as_str)
        .unwrap_or(TABLES.default_flag.as_str())
}

/// Flag image URL for `country`.
pub fn image_url(country: &CountryId) -> String {
    format!("{}/{}.png", FLAG_URL_BASE, flag_code(country))
}

/// Every `(country, region)` pair in the substitution table.
pub(crate) fn substitution_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    TABLES
        .region_by_country
        .iter()
        .map(|(country, region)| (country.as_str(), region.as_str()))
}
