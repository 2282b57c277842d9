//! Shared handles to a single store.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Edit, Error, Key, PrefValue, Reader, Writer};

/// A cloneable handle to one store.
///
/// Every clone reads and commits through the same underlying store, guarded
/// by a mutex. Environments hand these out so that several preference
/// objects opened on one namespace observe each other's writes.
///
/// # Example
///
/// ```rust,ignore
/// use typedprefs_kv_store::SharedStore;
///
/// let shared = SharedStore::new(MyStore::new());
/// let other = shared.clone();
/// ```
pub struct SharedStore<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedStore<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Lock the underlying store for direct access.
    pub fn lock(&self) -> Result<MutexGuard<'_, T>, Error> {
        self.inner.lock().map_err(|_| Error::ImplementationFailure {
            message: "shared store lock poisoned".into(),
        })
    }

    /// Whether two handles refer to the same store.
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for SharedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Reader> Reader for SharedStore<T> {
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error> {
        self.lock()?.read(key)
    }

    fn keys(&mut self) -> Result<Vec<Key>, Error> {
        self.lock()?.keys()
    }
}

impl<T: Writer> Writer for SharedStore<T> {
    fn commit(&mut self, edit: Edit) -> Result<(), Error> {
        self.lock()?.commit(edit)
    }
}
