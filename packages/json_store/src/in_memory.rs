//! In-memory stores and the environment that hands them out.

use std::collections::HashMap;
use std::sync::Mutex;

use typedprefs_kv_store::{
    Edit, Environment, Error, Key, Namespace, PrefValue, Reader, SharedStore, Writer,
};

use crate::json_utils::Entries;

/// A store that keeps its entries in memory.
///
/// # Example
///
/// ```rust
/// use typedprefs_json_store::InMemoryStore;
/// use typedprefs_kv_store::{key, Edit, ReaderExt, Writer};
///
/// let mut store = InMemoryStore::new();
///
/// store.commit(Edit::new().put_int(key!("click_count"), 3)).unwrap();
///
/// assert_eq!(store.get_int(&key!("click_count"), 0).unwrap(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    entries: Entries,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_entries(entries: Entries) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &Entries {
        &self.entries
    }
}

impl Reader for InMemoryStore {
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn keys(&mut self) -> Result<Vec<Key>, Error> {
        Ok(self.entries.keys().cloned().collect())
    }
}

impl Writer for InMemoryStore {
    fn commit(&mut self, edit: Edit) -> Result<(), Error> {
        log::trace!("Committing {} operation(s) in memory", edit.operations().len());
        edit.apply_to(&mut self.entries);
        Ok(())
    }
}

/// An environment whose namespaces live in memory for its own lifetime.
///
/// Opening a namespace again returns a handle to the same store.
#[derive(Default)]
pub struct MemoryEnvironment {
    stores: Mutex<HashMap<Namespace, SharedStore<InMemoryStore>>>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every namespace opened so far, sorted.
    pub fn namespaces(&self) -> Result<Vec<Namespace>, Error> {
        let stores = self.stores.lock().map_err(|_| Error::ImplementationFailure {
            message: "environment lock poisoned".to_string(),
        })?;
        let mut names: Vec<Namespace> = stores.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl Environment for MemoryEnvironment {
    type Store = SharedStore<InMemoryStore>;

    fn open(&self, namespace: &Namespace) -> Result<Self::Store, Error> {
        let mut stores = self.stores.lock().map_err(|_| Error::NamespaceOpen {
            namespace: namespace.to_string(),
            message: "environment lock poisoned".to_string(),
        })?;

        Ok(stores
            .entry(namespace.clone())
            .or_insert_with(|| {
                log::debug!("Creating in-memory namespace {}", namespace);
                SharedStore::new(InMemoryStore::new())
            })
            .clone())
    }
}
