//! Lazily loaded, append-only table of fallback records.
//!
//! The snapshot is read and parsed once per process on first use. A failed
//! load is not remembered: the next call reads the source again.

use std::sync::Arc;

use log::{debug, info};
use once_cell::sync::OnceCell;

use super::source::{EmbeddedSnapshot, SnapshotSource};
use crate::errors::SnapshotError;
use crate::models::{parse_records, CountryId, CountryRecord};

/// An immutable view of the loaded records. Cheap to clone.
#[derive(Clone, Debug)]
pub struct Snapshot {
    records: Arc<[CountryRecord]>,
}

impl Snapshot {
    pub fn new(records: Vec<CountryRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose region name equals `region` exactly.
    pub fn find_by_region(&self, region: &str) -> Option<&CountryRecord> {
        self.records.iter().find(|r| r.region_name == region)
    }

    /// First record whose country name matches `id`, ignoring case.
    pub fn find_by_country_name(&self, id: &CountryId) -> Option<&CountryRecord> {
        self.records.iter().find(|r| id.matches(&r.country_name))
    }

    pub fn first(&self) -> Option<&CountryRecord> {
        self.records.first()
    }
}

/// Process-wide fallback store, owned by whoever composes the pipeline.
pub struct HistoryStore {
    source: Box<dyn SnapshotSource>,
    loaded: OnceCell<Snapshot>,
}

impl HistoryStore {
    pub fn new(source: impl SnapshotSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            loaded: OnceCell::new(),
        }
    }

    /// Store backed by the snapshot bundled with the crate.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSnapshot)
    }

    /// Store that is already loaded with the given records.
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        let store = Self::new(EmbeddedSnapshot);
        // A fresh cell cannot already be set.
        let _ = store.loaded.set(Snapshot::new(records));
        store
    }

    /// Load the snapshot, reading the source only on the first success.
    pub fn load(&self) -> Result<Snapshot, SnapshotError> {
        self.loaded
            .get_or_try_init(|| -> Result<Snapshot, SnapshotError> {
                debug!("Loading fallback records from {}", self.source.describe());
                let raw = self.source.read()?;
                let records = parse_records(&raw)?;
                info!(
                    "Loaded {} fallback records from {}",
                    records.len(),
                    self.source.describe()
                );
                Ok(Snapshot::new(records))
            })
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    pub fn find_by_region(&self, region: &str) -> Result<Option<CountryRecord>, SnapshotError> {
        Ok(self.load()?.find_by_region(region).cloned())
    }

    pub fn find_by_country_name(
        &self,
        id: &CountryId,
    ) -> Result<Option<CountryRecord>, SnapshotError> {
        Ok(self.load()?.find_by_country_name(id).cloned())
    }

    pub fn first(&self) -> Result<Option<CountryRecord>, SnapshotError> {
        Ok(self.load()?.first().cloned())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::models::{DailyStat, TimeSeries};

    struct CountingSource {
        reads: Arc<AtomicUsize>,
        /// Number of initial reads that fail
        failures: usize,
        body: &'static str,
    }

    impl SnapshotSource for CountingSource {
        fn describe(&self) -> String {
            "counting source".to_string()
        }

        fn read(&self) -> Result<String, SnapshotError> {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            if n < self.failures {
                return Err(SnapshotError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "missing",
                )));
            }
            Ok(self.body.to_string())
        }
    }

    const BODY: &str = r#"[
        {"country": "Canada", "region": "Ontario", "cases": {"2023-03-01": {"total": 10, "new": 1}}},
        {"country": "Canada", "region": "Quebec", "cases": {"2023-03-01": {"total": 20, "new": 2}}},
        {"country": "Peru", "region": "Lima", "cases": {"2023-03-01": {"total": 30, "new": 3}}}
    ]"#;

    fn record(country: &str, region: &str) -> CountryRecord {
        let mut series = TimeSeries::new();
        series.insert("2023-03-01", DailyStat::new(1, 1));
        CountryRecord::new(country, region, series)
    }

    #[test]
    fn test_load_reads_source_once() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = HistoryStore::new(CountingSource {
            reads: reads.clone(),
            failures: 0,
            body: BODY,
        });

        assert!(!store.is_loaded());
        assert_eq!(store.load().unwrap().len(), 3);
        assert_eq!(store.load().unwrap().len(), 3);
        store.find_by_region("Lima").unwrap();
        assert!(store.is_loaded());
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = HistoryStore::new(CountingSource {
            reads: reads.clone(),
            failures: 1,
            body: BODY,
        });

        assert!(matches!(store.load(), Err(SnapshotError::Io(_))));
        assert!(!store.is_loaded());
        assert_eq!(store.load().unwrap().len(), 3);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let store = HistoryStore::new(CountingSource {
            reads: Arc::new(AtomicUsize::new(0)),
            failures: 0,
            body: "{ not an array",
        });

        assert!(matches!(store.load(), Err(SnapshotError::Parse(_))));
    }

    #[test]
    fn test_find_by_region_is_exact() {
        let store = HistoryStore::from_records(vec![
            record("Canada", "Ontario"),
            record("Canada", "Quebec"),
        ]);

        let found = store.find_by_region("Quebec").unwrap().unwrap();
        assert_eq!(found.region_name, "Quebec");
        assert!(store.find_by_region("quebec").unwrap().is_none());
    }

    #[test]
    fn test_find_by_country_name_ignores_case_and_takes_first() {
        let store = HistoryStore::from_records(vec![
            record("Peru", "Lima"),
            record("Canada", "Ontario"),
            record("Canada", "Quebec"),
        ]);

        let found = store
            .find_by_country_name(&CountryId::from("CANADA"))
            .unwrap()
            .unwrap();
        assert_eq!(found.region_name, "Ontario");
        assert!(store
            .find_by_country_name(&CountryId::from("Chile"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_first_of_empty_store_is_none() {
        let store = HistoryStore::from_records(Vec::new());
        assert!(store.first().unwrap().is_none());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_embedded_snapshot_parses() {
        let store = HistoryStore::embedded();
        let snapshot = store.load().unwrap();

        assert!(!snapshot.is_empty());
        assert!(snapshot.records().iter().all(|r| !r.series.is_empty()));
    }
}
