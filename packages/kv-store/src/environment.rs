//! Resolving namespaces to stores.

use crate::{Error, Namespace, Store};

/// A host environment that hands out private, namespace-scoped stores.
///
/// Opening the same namespace twice yields stores over the same entries;
/// different namespaces never see each other's entries. Failures to resolve
/// a namespace are reported as [`Error::NamespaceOpen`].
pub trait Environment {
    type Store: Store;

    fn open(&self, namespace: &Namespace) -> Result<Self::Store, Error>;
}

impl<E: Environment + ?Sized> Environment for &E {
    type Store = E::Store;

    fn open(&self, namespace: &Namespace) -> Result<Self::Store, Error> {
        (**self).open(namespace)
    }
}
