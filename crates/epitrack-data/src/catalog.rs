//! Country catalog.
//!
//! The catalog is the fixed list of countries offered for selection. It does
//! no I/O; configuration may replace the default list.

use std::collections::HashSet;

use crate::models::CountryId;

/// Countries offered when no list is configured.
pub const DEFAULT_COUNTRIES: [&str; 10] = [
    "Mexico",
    "Canada",
    "Italy",
    "France",
    "Germany",
    "Japan",
    "Brazil",
    "Argentina",
    "Spain",
    "India",
];

/// Source of the selectable countries.
pub trait CatalogProvider: Send + Sync {
    /// Non-empty, de-duplicated, ordered list of countries.
    fn list_countries(&self) -> Vec<CountryId>;

    /// Countries whose name contains `query`, ignoring case.
    ///
    /// A blank query returns the whole catalog.
    fn search(&self, query: &str) -> Vec<CountryId> {
        let needle = query.trim().to_lowercase();
        self.list_countries()
            .into_iter()
            .filter(|id| needle.is_empty() || id.as_str().to_lowercase().contains(&needle))
            .collect()
    }
}

/// Catalog over a list fixed at construction.
#[derive(Clone, Debug)]
pub struct StaticCatalog {
    countries: Vec<CountryId>,
}

impl StaticCatalog {
    /// Catalog of [`DEFAULT_COUNTRIES`].
    pub fn new() -> Self {
        Self::from_names(DEFAULT_COUNTRIES)
    }

    /// Catalog of the given names, in order.
    ///
    /// Blank names and case-insensitive duplicates are dropped, keeping the
    /// first spelling. If nothing is left the default list is used.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let countries: Vec<CountryId> = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(CountryId::from)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        if countries.is_empty() {
            return Self {
                countries: DEFAULT_COUNTRIES.iter().copied().map(CountryId::from).collect(),
            };
        }
        Self { countries }
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn contains(&self, id: &CountryId) -> bool {
        self.countries.contains(id)
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_countries(&self) -> Vec<CountryId> {
        self.countries.clone()
    }
}
