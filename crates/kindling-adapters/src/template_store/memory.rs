//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use kindling_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::KindlingResult,
};

use crate::builtin_templates::BUILTIN_TEMPLATES;

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the bundled templates loaded.
    pub fn with_builtin() -> KindlingResult<Self> {
        let store = Self::new();
        for (path, body) in BUILTIN_TEMPLATES {
            store.insert(*path, body.as_bytes().to_vec())?;
        }
        Ok(store)
    }

    /// Add or replace an entry.
    pub fn insert(&self, path: impl Into<String>, body: impl Into<Vec<u8>>) -> KindlingResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert(path.into(), body.into());
        Ok(())
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for InMemoryStore {
    fn list(&self) -> KindlingResult<Vec<String>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.keys().cloned().collect())
    }

    fn read(&self, path: &str) -> KindlingResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.get(path).cloned().ok_or_else(|| {
            ApplicationError::ReadFailure {
                path: path.into(),
                reason: "no such template in store".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_lists_every_bundled_template() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), BUILTIN_TEMPLATES.len());
        assert!(
            store
                .list()
                .unwrap()
                .contains(&"project/apis/GROUP/VERSION/KIND_types.go.tmpl".to_string())
        );
    }

    #[test]
    fn read_missing_entry_fails() {
        let store = InMemoryStore::new();
        assert!(store.read("project/nope.tmpl").is_err());
    }

    #[test]
    fn insert_replaces_entry() {
        let store = InMemoryStore::new();
        store.insert("a.tmpl", "one").unwrap();
        store.insert("a.tmpl", "two").unwrap();
        assert_eq!(store.read("a.tmpl").unwrap(), b"two");
    }
}
