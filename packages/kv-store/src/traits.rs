//! Core traits: Reader, Writer, Store.

use crate::{Edit, Error, Key, Kind, PrefValue};

/// Read values from a preference store.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Reader>`.
pub trait Reader: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key.
    /// * `Ok(Some(value))` - The stored value, in the kind it was written as.
    /// * `Err(Error)` - The store could not be read.
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error>;

    /// List every key currently holding a value, in ascending order.
    fn keys(&mut self) -> Result<Vec<Key>, Error>;
}

/// Write to a preference store.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Writer>`.
pub trait Writer: Send + Sync {
    /// Apply a batch of modifications as one unit.
    ///
    /// Either the whole edit becomes visible to later reads or none of it
    /// does. See [`Edit`] for ordering rules.
    fn commit(&mut self, edit: Edit) -> Result<(), Error>;
}

/// Combined read/write access to a preference store.
pub trait Store: Reader + Writer {}
impl<T: Reader + Writer> Store for T {}

/// Kind-checked getters with defaults, available on every [`Reader`].
///
/// A value stored under the key in a different kind is reported as
/// [`Error::KindMismatch`] rather than converted.
///
/// # Example
///
/// ```rust,ignore
/// use typedprefs_kv_store::{key, ReaderExt};
///
/// let clicks = store.get_int(&key!("click_count"), 0)?;
/// let token = store.get_string(&key!("api_token"), None)?;
/// ```
pub trait ReaderExt: Reader {
    /// Read `key` as `kind`, returning `None` when it is absent.
    fn read_kind(&mut self, key: &Key, kind: Kind) -> Result<Option<PrefValue>, Error> {
        match self.read(key)? {
            Some(value) if value.kind() == kind => Ok(Some(value)),
            Some(value) => Err(Error::KindMismatch {
                key: key.to_string(),
                expected: kind,
                found: value.kind(),
            }),
            None => Ok(None),
        }
    }

    fn get_boolean(&mut self, key: &Key, default: bool) -> Result<bool, Error> {
        Ok(self
            .read_kind(key, Kind::Boolean)?
            .and_then(|v| v.as_bool())
            .unwrap_or(default))
    }

    fn get_int(&mut self, key: &Key, default: i32) -> Result<i32, Error> {
        Ok(self
            .read_kind(key, Kind::Int)?
            .and_then(|v| v.as_int())
            .unwrap_or(default))
    }

    fn get_long(&mut self, key: &Key, default: i64) -> Result<i64, Error> {
        Ok(self
            .read_kind(key, Kind::Long)?
            .and_then(|v| v.as_long())
            .unwrap_or(default))
    }

    fn get_float(&mut self, key: &Key, default: f32) -> Result<f32, Error> {
        Ok(self
            .read_kind(key, Kind::Float)?
            .and_then(|v| v.as_float())
            .unwrap_or(default))
    }

    fn get_string(&mut self, key: &Key, default: Option<String>) -> Result<Option<String>, Error> {
        match self.read_kind(key, Kind::String)? {
            Some(PrefValue::String(s)) => Ok(Some(s)),
            _ => Ok(default),
        }
    }

    fn contains(&mut self, key: &Key) -> Result<bool, Error> {
        Ok(self.read(key)?.is_some())
    }
}

// Blanket implementation for all Readers
impl<R: Reader + ?Sized> ReaderExt for R {}

// Blanket implementations for references and boxes

impl<T: Reader + ?Sized> Reader for &mut T {
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error> {
        (*self).read(key)
    }

    fn keys(&mut self) -> Result<Vec<Key>, Error> {
        (*self).keys()
    }
}

impl<T: Writer + ?Sized> Writer for &mut T {
    fn commit(&mut self, edit: Edit) -> Result<(), Error> {
        (*self).commit(edit)
    }
}

impl<T: Reader + ?Sized> Reader for Box<T> {
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error> {
        self.as_mut().read(key)
    }

    fn keys(&mut self) -> Result<Vec<Key>, Error> {
        self.as_mut().keys()
    }
}

impl<T: Writer + ?Sized> Writer for Box<T> {
    fn commit(&mut self, edit: Edit) -> Result<(), Error> {
        self.as_mut().commit(edit)
    }
}
