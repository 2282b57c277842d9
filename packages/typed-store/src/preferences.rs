//! The typed preferences façade.

use typedprefs_kv_store::{
    Edit, Environment, Key, Kind, Namespace, PrefValue, Reader, Store, Writer,
};

use crate::{Error, Field, FieldDescriptor, FieldRegistry, Preference};

/// Typed, defaulted fields over a key-value store.
///
/// Fields are declared once, with a name, an optional key (the name is used
/// when it is omitted), a kind and a default. Every access goes straight to
/// the store: there is no caching, and no locking beyond what the store does.
///
/// # Example
///
/// ```rust
/// use typedprefs::Preferences;
/// use typedprefs_json_store::InMemoryStore;
///
/// # fn main() -> Result<(), typedprefs::Error> {
/// let mut prefs = Preferences::new(InMemoryStore::new());
/// let token = prefs.declare_optional("api_token", None)?;
/// let clicks = prefs.declare("buy_click_count", Some("click_count"), 0i32)?;
///
/// assert_eq!(prefs.get(&clicks)?, 0);
/// prefs.set(&clicks, 3)?;
/// prefs.set(&token, Some("tok-1".to_string()))?;
/// assert_eq!(prefs.get(&clicks)?, 3);
///
/// prefs.clear()?;
/// assert_eq!(prefs.get(&token)?, None);
/// # Ok(())
/// # }
/// ```
pub struct Preferences<S> {
    store: S,
    registry: FieldRegistry,
}

impl<S> Preferences<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: FieldRegistry::new(),
        }
    }

    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.registry.iter()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: Store> Preferences<S> {
    /// Open the private store of `namespace` in `env` and wrap it.
    pub fn open<E>(env: &E, namespace: &str) -> Result<Self, Error>
    where
        E: Environment<Store = S> + ?Sized,
    {
        let namespace = Namespace::parse(namespace)?;
        log::debug!("Opening preferences in namespace {}", namespace);
        Ok(Self::new(env.open(&namespace)?))
    }

    /// Declare a field of type `T` with a default.
    ///
    /// The field is stored under `key`, or under `name` when `key` is `None`.
    pub fn declare<T: Preference>(
        &mut self,
        name: &str,
        key: Option<&str>,
        default: T,
    ) -> Result<Field<T>, Error> {
        let descriptor = FieldDescriptor::new(name, key, T::KIND, default.into_stored())?;
        self.registry.register(descriptor.clone())?;
        Ok(Field::new(descriptor))
    }

    /// Declare an optional string field; it reads as `None` until set.
    pub fn declare_optional(
        &mut self,
        name: &str,
        key: Option<&str>,
    ) -> Result<Field<Option<String>>, Error> {
        self.declare(name, key, None)
    }

    /// Declare a field whose kind is only known at runtime.
    pub fn declare_dynamic(
        &mut self,
        name: &str,
        key: Option<&str>,
        kind: Kind,
        default: Option<PrefValue>,
    ) -> Result<FieldDescriptor, Error> {
        let descriptor = FieldDescriptor::new(name, key, kind, default)?;
        self.registry.register(descriptor.clone())?;
        Ok(descriptor)
    }

    /// Read a field, falling back to its default when nothing is stored.
    pub fn get<T: Preference>(&mut self, field: &Field<T>) -> Result<T, Error> {
        let descriptor = field.descriptor();
        let value = self.get_value(descriptor)?;
        let found = value.as_ref().map(PrefValue::kind);

        T::from_stored(value).ok_or_else(|| match found {
            Some(found) => Error::WrongValueKind {
                field: descriptor.name().to_string(),
                expected: T::KIND,
                found,
            },
            None => Error::MissingDefault {
                field: descriptor.name().to_string(),
                kind: T::KIND,
            },
        })
    }

    /// Store a value for a field, replacing what was there.
    pub fn set<T: Preference>(&mut self, field: &Field<T>, value: T) -> Result<(), Error> {
        self.set_value(field.descriptor(), value.into_stored())
    }

    /// Read a field as an untyped value. `None` is the absent value of a
    /// string field.
    pub fn get_value(
        &mut self,
        descriptor: &FieldDescriptor,
    ) -> Result<Option<PrefValue>, Error> {
        self.check_declared(descriptor)?;
        log::trace!("Reading preference {}", descriptor.key());
        let stored = self.store.read(descriptor.key())?;
        descriptor.decode(stored)
    }

    /// Store an untyped value for a field in one commit. `None` removes the
    /// entry of a string field.
    pub fn set_value(
        &mut self,
        descriptor: &FieldDescriptor,
        value: Option<PrefValue>,
    ) -> Result<(), Error> {
        self.check_declared(descriptor)?;
        let edit = descriptor.encode(value)?;
        log::trace!("Writing preference {}", descriptor.key());
        self.store.commit(edit)?;
        Ok(())
    }

    /// Remove the stored entry of a field so that it reads as its default.
    pub fn reset(&mut self, descriptor: &FieldDescriptor) -> Result<(), Error> {
        self.check_declared(descriptor)?;
        self.store
            .commit(Edit::new().remove(descriptor.key().clone()))?;
        Ok(())
    }

    /// Remove every entry of the underlying store.
    ///
    /// This includes entries no field of this object declares: the store is
    /// treated as owned by these preferences.
    pub fn clear(&mut self) -> Result<(), Error> {
        log::debug!("Clearing preferences");
        self.store.commit(Edit::clearing())?;
        Ok(())
    }

    /// A handle for reading and writing one field.
    pub fn entry<'a, T: Preference>(&'a mut self, field: &'a Field<T>) -> Entry<'a, S, T> {
        Entry {
            preferences: self,
            field,
        }
    }

    fn check_declared(&self, descriptor: &FieldDescriptor) -> Result<(), Error> {
        if self.registry.contains(descriptor) {
            Ok(())
        } else {
            Err(Error::UndeclaredField {
                field: descriptor.name().to_string(),
            })
        }
    }
}

/// Access to one field of a [`Preferences`] object.
///
/// # Example
///
/// ```rust,ignore
/// let mut clicks = prefs.entry(&buy_click_count);
/// clicks.update(|n| n + 1)?;
/// clicks.reset()?;
/// ```
pub struct Entry<'a, S, T> {
    preferences: &'a mut Preferences<S>,
    field: &'a Field<T>,
}

impl<S: Store, T: Preference> Entry<'_, S, T> {
    pub fn get(&mut self) -> Result<T, Error> {
        self.preferences.get(self.field)
    }

    pub fn set(&mut self, value: T) -> Result<(), Error> {
        self.preferences.set(self.field, value)
    }

    /// Read, transform and write back, returning the new value.
    ///
    /// The read and the write are separate store operations.
    pub fn update(&mut self, f: impl FnOnce(T) -> T) -> Result<T, Error>
    where
        T: Clone,
    {
        let value = f(self.get()?);
        self.set(value.clone())?;
        Ok(value)
    }

    /// Forget the stored value so the field reads as its default again.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.preferences.reset(self.field.descriptor())
    }

    pub fn is_set(&mut self) -> Result<bool, Error> {
        Ok(self.preferences.store.read(self.field.key())?.is_some())
    }

    pub fn key(&self) -> &Key {
        self.field.key()
    }

    pub fn default_value(&self) -> Option<T> {
        self.field.default_value()
    }

    pub fn field(&self) -> &Field<T> {
        self.field
    }
}
