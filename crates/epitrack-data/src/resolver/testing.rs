//! Fakes shared by the resolver tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::{CountryId, CountryRecord, DailyStat, TimeSeries};
use crate::provider::CaseDataProvider;

/// Canned reply of the mock provider.
#[derive(Clone)]
pub enum Reply {
    Records(Vec<CountryRecord>),
    Unreachable,
    Malformed,
    NoData,
}

/// Provider returning queued replies (the last one repeats) and counting
/// calls.
pub struct MockProvider {
    replies: Mutex<Vec<Reply>>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn always(reply: Reply) -> Self {
        Self::new(vec![reply])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaseDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch_country(
        &self,
        country: &CountryId,
    ) -> Result<Vec<CountryRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.len() > 1 {
                replies.remove(0)
            } else {
                replies[0].clone()
            }
        };

        match reply {
            Reply::Records(records) => Ok(records),
            Reply::Unreachable => Err(ProviderError::Unreachable {
                provider: "MOCK".to_string(),
                message: "connection refused".to_string(),
            }),
            Reply::Malformed => Err(ProviderError::MalformedResponse {
                provider: "MOCK".to_string(),
                message: "expected a sequence".to_string(),
                payload: "{}".to_string(),
            }),
            Reply::NoData => Err(ProviderError::NoData {
                provider: "MOCK".to_string(),
                country: country.to_string(),
            }),
        }
    }
}

/// Record with one entry per `(date, total, new)`.
pub fn record(country: &str, region: &str, entries: &[(&str, u64, u64)]) -> CountryRecord {
    let series: TimeSeries = entries
        .iter()
        .map(|(date, total, new)| (date.to_string(), DailyStat::new(*total, *new)))
        .collect();
    CountryRecord::new(country, region, series)
}
