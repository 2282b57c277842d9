//! Batched store modifications.

use crate::{Key, PrefValue};

/// One modification inside an [`Edit`].
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Put(Key, PrefValue),
    Remove(Key),
}

/// A batch of modifications applied by [`Writer::commit`](crate::Writer::commit).
///
/// Commit semantics:
/// - if [`clear`](Edit::clear) was requested, every existing entry is removed
///   first, regardless of where in the chain `clear` was called;
/// - puts and removes are then applied in the order they were added;
/// - the whole batch becomes visible at once.
///
/// # Example
///
/// ```rust
/// use typedprefs_kv_store::{key, Edit};
///
/// let edit = Edit::new()
///     .put_string(key!("api_token"), Some("tok-1".to_string()))
///     .put_int(key!("click_count"), 3);
/// assert_eq!(edit.operations().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use = "an edit does nothing until it is committed"]
pub struct Edit {
    clear: bool,
    operations: Vec<Operation>,
}

impl Edit {
    pub fn new() -> Self {
        Self::default()
    }

    /// An edit that only wipes the store.
    pub fn clearing() -> Self {
        Self::new().clear()
    }

    /// Put `value` under `key`, replacing whatever was there.
    pub fn put(mut self, key: Key, value: impl Into<PrefValue>) -> Self {
        self.operations.push(Operation::Put(key, value.into()));
        self
    }

    pub fn put_boolean(self, key: Key, value: bool) -> Self {
        self.put(key, value)
    }

    pub fn put_int(self, key: Key, value: i32) -> Self {
        self.put(key, value)
    }

    pub fn put_long(self, key: Key, value: i64) -> Self {
        self.put(key, value)
    }

    pub fn put_float(self, key: Key, value: f32) -> Self {
        self.put(key, value)
    }

    /// Put a string, or remove the entry when `value` is `None`.
    pub fn put_string(self, key: Key, value: Option<String>) -> Self {
        match value {
            Some(s) => self.put(key, s),
            None => self.remove(key),
        }
    }

    pub fn remove(mut self, key: Key) -> Self {
        self.operations.push(Operation::Remove(key));
        self
    }

    pub fn clear(mut self) -> Self {
        self.clear = true;
        self
    }

    pub fn clears(&self) -> bool {
        self.clear
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        !self.clear && self.operations.is_empty()
    }

    /// Apply this edit to an ordered map of entries.
    ///
    /// Stores that keep their entries in a `BTreeMap` can use this directly
    /// from their `commit`.
    pub fn apply_to(self, entries: &mut std::collections::BTreeMap<Key, PrefValue>) {
        if self.clear {
            entries.clear();
        }

        for operation in self.operations {
            match operation {
                Operation::Put(key, value) => {
                    entries.insert(key, value);
                }
                Operation::Remove(key) => {
                    entries.remove(&key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;
    use std::collections::BTreeMap;

    #[test]
    fn put_string_none_removes() {
        let edit = Edit::new().put_string(key!("api_token"), None);
        assert_eq!(edit.operations(), &[Operation::Remove(key!("api_token"))]);
    }

    #[test]
    fn clear_applies_before_puts() {
        let mut entries = BTreeMap::new();
        entries.insert(key!("old"), PrefValue::Int(1));

        Edit::new()
            .put_int(key!("click_count"), 3)
            .clear()
            .apply_to(&mut entries);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get(&key!("click_count")), Some(&PrefValue::Int(3)));
    }

    #[test]
    fn operations_apply_in_order() {
        let mut entries = BTreeMap::new();

        Edit::new()
            .put_int(key!("a"), 1)
            .remove(key!("a"))
            .put_long(key!("b"), 2)
            .put_long(key!("b"), 5)
            .apply_to(&mut entries);

        assert_eq!(entries.get(&key!("a")), None);
        assert_eq!(entries.get(&key!("b")), Some(&PrefValue::Long(5)));
    }

    #[test]
    fn empty_edit() {
        assert!(Edit::new().is_empty());
        assert!(!Edit::clearing().is_empty());
        assert!(Edit::clearing().clears());
    }
}
