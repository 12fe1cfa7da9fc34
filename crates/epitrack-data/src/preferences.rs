//! Persisted user preferences.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::CountryId;

/// Key under which the last viewed country is stored.
pub const LAST_VIEWED_COUNTRY_KEY: &str = "lastViewedCountry";

/// String key-value storage behind [`Preferences`].
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Typed access to the preferences the application remembers.
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The country last opened in a detail view, if one was recorded.
    pub fn last_viewed_country(&self) -> Option<CountryId> {
        self.store
            .get(LAST_VIEWED_COUNTRY_KEY)
            .filter(|name| !name.trim().is_empty())
            .map(CountryId::from)
    }

    pub fn set_last_viewed_country(&self, id: &CountryId) {
        self.store.set(LAST_VIEWED_COUNTRY_KEY, id.as_str());
    }

    pub fn clear_last_viewed_country(&self) {
        self.store.remove(LAST_VIEWED_COUNTRY_KEY);
    }
}
