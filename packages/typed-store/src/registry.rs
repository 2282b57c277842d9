//! The table of fields declared on one set of preferences.

use std::collections::HashMap;

use typedprefs_kv_store::{Key, Kind};

use crate::{Error, FieldDescriptor};

/// Declared fields, in declaration order.
///
/// The registry enforces that every key is only declared with one kind, so
/// no two fields of one preferences object can read the same entry as
/// different kinds.
#[derive(Clone, Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
    kinds_by_key: HashMap<Key, Kind>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field.
    ///
    /// Registering an identical descriptor again is a no-op. A different
    /// descriptor under a known name is [`Error::DuplicateField`]; a known key
    /// with another kind is [`Error::KindConflict`].
    pub fn register(&mut self, descriptor: FieldDescriptor) -> Result<(), Error> {
        if let Some(&index) = self.by_name.get(descriptor.name()) {
            if self.fields[index] == descriptor {
                return Ok(());
            }
            return Err(Error::DuplicateField {
                field: descriptor.name().to_string(),
            });
        }

        if let Some(&existing) = self.kinds_by_key.get(descriptor.key()) {
            if existing != descriptor.kind() {
                return Err(Error::KindConflict {
                    key: descriptor.key().to_string(),
                    existing,
                    requested: descriptor.kind(),
                });
            }
        }

        log::trace!("Declaring preference field {}", descriptor);

        self.kinds_by_key
            .insert(descriptor.key().clone(), descriptor.kind());
        self.by_name
            .insert(descriptor.name().to_string(), self.fields.len());
        self.fields.push(descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }

    /// Whether exactly this descriptor was registered.
    pub fn contains(&self, descriptor: &FieldDescriptor) -> bool {
        self.get(descriptor.name()) == Some(descriptor)
    }

    /// The kind a key was declared with, if any field uses it.
    pub fn kind_of(&self, key: &Key) -> Option<Kind> {
        self.kinds_by_key.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
