//! Memo cache for resolved details.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

use crate::models::{CountryId, ResolvedDetail};

/// Country id → resolved detail, shared between the resolver and its memo
/// tier.
///
/// Keys compare case-insensitively, so "mexico" hits an entry stored under
/// "Mexico". Entries are never evicted; concurrent inserts for the same id
/// keep the last write.
#[derive(Debug, Default)]
pub struct DetailCache {
    entries: RwLock<HashMap<CountryId, Arc<ResolvedDetail>>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &CountryId) -> Option<Arc<ResolvedDetail>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn insert(&self, id: CountryId, detail: Arc<ResolvedDetail>) {
        debug!("Memoizing detail for '{}'", id);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, detail);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
