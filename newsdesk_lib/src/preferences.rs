//! The selected news source, persisted through a [`PreferenceStore`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;

use crate::store::PreferenceStore;

/// Source used until the user picks one.
pub const DEFAULT_SOURCE_ID: &str = "abc-news-au";

const SELECTED_SOURCE_KEY: &str = "selectedSourceID";

/// Reads and writes the selected source id.
pub struct SourcePreferences<S> {
    store: S,
}

impl<S: PreferenceStore> SourcePreferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The stored source id, or [`DEFAULT_SOURCE_ID`] when none is stored.
    pub fn selected_source_id(&self) -> Result<String, S::Error> {
        Ok(self
            .store
            .get_string(SELECTED_SOURCE_KEY)?
            .unwrap_or_else(|| DEFAULT_SOURCE_ID.to_string()))
    }

    pub fn set_selected_source_id(&self, id: &str) -> Result<(), S::Error> {
        self.store.set_string(SELECTED_SOURCE_KEY, id)?;
        tracing::info!(source = id, "selected source updated");
        Ok(())
    }

    /// Forgets the selection so the default applies again.
    pub fn reset(&self) -> Result<(), S::Error> {
        self.store.remove(SELECTED_SOURCE_KEY)
    }
}

/// In-process [`PreferenceStore`].
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    type Error = Infallible;

    fn get_string(&self, key: &str) -> Result<Option<String>, Infallible> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), Infallible> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Infallible> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

impl<S: PreferenceStore> PreferenceStore for &S {
    type Error = S::Error;

    fn get_string(&self, key: &str) -> Result<Option<String>, S::Error> {
        (**self).get_string(key)
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), S::Error> {
        (**self).set_string(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), S::Error> {
        (**self).remove(key)
    }
}
