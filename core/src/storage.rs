use std::collections::BTreeMap;

use anyhow::{Context, Result};

use crate::models::Item;

/// Key under which the item list is stored.
pub const DEFAULT_KEY: &str = "data";

/// String key-value storage the tracker persists into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns whether a value was present.
    fn remove(&mut self, key: &str) -> Result<bool>;
    fn clear(&mut self) -> Result<()>;
}

/// Volatile store, used for tests and throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// What [`Persistence::clear`] removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearScope {
    /// Only the tracker's own key.
    #[default]
    Key,
    /// Every key in the underlying store.
    All,
}

/// Reads and writes the whole item list as a single JSON record.
pub struct Persistence<S> {
    store: S,
    key: String,
    scope: ClearScope,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_KEY.to_string(),
            scope: ClearScope::default(),
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_clear_scope(mut self, scope: ClearScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Overwrite the stored record with `items`.
    pub fn save(&mut self, items: &[Item]) -> Result<()> {
        let json = serde_json::to_string(items).context("Failed to serialize items")?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, count = items.len(), "saved items");
        Ok(())
    }

    /// Stored items, or an empty list when the record is missing, unreadable,
    /// or malformed.
    pub fn load(&self) -> Vec<Item> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to read stored items: {e:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<Item>>(&raw) {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "loaded items");
                items
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "ignoring malformed stored items: {e}");
                Vec::new()
            }
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        match self.scope {
            ClearScope::Key => {
                self.store.remove(&self.key)?;
            }
            ClearScope::All => self.store.clear()?,
        }
        tracing::debug!(key = %self.key, scope = ?self.scope, "cleared stored items");
        Ok(())
    }
}
