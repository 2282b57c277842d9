//! Field descriptors.

use std::fmt;
use std::marker::PhantomData;

use typedprefs_kv_store::{Edit, Key, Kind, PrefValue};

use crate::{Error, Preference};

/// Everything needed to read and write one preference: its name, the key it
/// is stored under, its kind and its default.
///
/// Descriptors are validated on creation and immutable afterwards. Reads and
/// writes through a descriptor always use its kind.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    key: Key,
    kind: Kind,
    default: Option<PrefValue>,
}

impl FieldDescriptor {
    /// Describe a field.
    ///
    /// `key` defaults to `name`. Every kind except `string` needs a default
    /// of that same kind; a string field without one defaults to absent.
    ///
    /// ```rust
    /// use typedprefs::{FieldDescriptor, Kind, PrefValue};
    ///
    /// let clicks = FieldDescriptor::new(
    ///     "buy_click_count",
    ///     Some("click_count"),
    ///     Kind::Int,
    ///     Some(PrefValue::Int(0)),
    /// )
    /// .unwrap();
    /// assert_eq!(clicks.key().as_str(), "click_count");
    ///
    /// assert!(FieldDescriptor::new("clicks", None, Kind::Int, None).is_err());
    /// ```
    pub fn new(
        name: &str,
        key: Option<&str>,
        kind: Kind,
        default: Option<PrefValue>,
    ) -> Result<Self, Error> {
        let key = Key::parse(key.unwrap_or(name))?;

        match &default {
            None if kind != Kind::String => {
                return Err(Error::MissingDefault {
                    field: name.to_string(),
                    kind,
                });
            }
            Some(value) if value.kind() != kind => {
                return Err(Error::DefaultKindMismatch {
                    field: name.to_string(),
                    expected: kind,
                    found: value.kind(),
                });
            }
            _ => {}
        }

        Ok(FieldDescriptor {
            name: name.to_string(),
            key,
            kind,
            default,
        })
    }

    /// Describe a field from textual kind and default, as typed by a user.
    ///
    /// Unknown kind names fail here, at declaration, with
    /// [`UnsupportedKind`](typedprefs_kv_store::Error::UnsupportedKind).
    pub fn parse(
        name: &str,
        key: Option<&str>,
        kind: &str,
        default: Option<&str>,
    ) -> Result<Self, Error> {
        let kind: Kind = kind.parse()?;
        let default = default
            .map(|text| PrefValue::parse(kind, text))
            .transpose()?;
        Self::new(name, key, kind, default)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn default_value(&self) -> Option<&PrefValue> {
        self.default.as_ref()
    }

    /// Turn what the store returned for this field's key into the field's
    /// value, substituting the default for a missing entry.
    pub fn decode(&self, stored: Option<PrefValue>) -> Result<Option<PrefValue>, Error> {
        match stored {
            None => Ok(self.default.clone()),
            Some(value) if value.kind() == self.kind => Ok(Some(value)),
            Some(value) => Err(typedprefs_kv_store::Error::KindMismatch {
                key: self.key.to_string(),
                expected: self.kind,
                found: value.kind(),
            }
            .into()),
        }
    }

    /// The single-key edit that stores `value` for this field. The absent
    /// value removes the entry.
    pub fn encode(&self, value: Option<PrefValue>) -> Result<Edit, Error> {
        match value {
            None if self.kind == Kind::String => Ok(Edit::new().remove(self.key.clone())),
            None => Err(Error::AbsentNotAllowed {
                field: self.name.clone(),
                kind: self.kind,
            }),
            Some(value) if value.kind() != self.kind => Err(Error::WrongValueKind {
                field: self.name.clone(),
                expected: self.kind,
                found: value.kind(),
            }),
            Some(value) => Ok(Edit::new().put(self.key.clone(), value)),
        }
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) @ {}", self.name, self.kind, self.key)?;
        match &self.default {
            Some(default) => write!(f, " = {}", default),
            None => write!(f, " = <absent>"),
        }
    }
}

/// A declared field holding values of type `T`.
///
/// Obtained from [`Preferences::declare`](crate::Preferences::declare); the
/// type parameter ties the field's kind to a Rust type so that reads and
/// writes need no runtime kind checks at the call site.
pub struct Field<T> {
    descriptor: FieldDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Preference> Field<T> {
    pub(crate) fn new(descriptor: FieldDescriptor) -> Self {
        debug_assert_eq!(descriptor.kind(), T::KIND);
        Field {
            descriptor,
            _marker: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn key(&self) -> &Key {
        self.descriptor.key()
    }

    /// The value reads return while nothing is stored.
    pub fn default_value(&self) -> Option<T> {
        T::from_stored(self.descriptor.default.clone())
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Field {
            descriptor: self.descriptor.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.descriptor).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typedprefs_kv_store::{key, Operation};

    #[test]
    fn key_defaults_to_name() {
        let d = FieldDescriptor::new("has_data", None, Kind::Boolean, Some(false.into())).unwrap();
        assert_eq!(d.key(), &key!("has_data"));
        assert_eq!(d.name(), "has_data");
    }

    #[test]
    fn string_fields_default_to_absent() {
        let d = FieldDescriptor::new("apiToken", Some("api_token"), Kind::String, None).unwrap();
        assert_eq!(d.default_value(), None);
        assert_eq!(d.decode(None).unwrap(), None);
    }

    #[test]
    fn string_fields_may_override_default() {
        let d = FieldDescriptor::new("theme", None, Kind::String, Some("light".into())).unwrap();
        assert_eq!(d.decode(None).unwrap(), Some(PrefValue::from("light")));
    }

    #[test]
    fn missing_default_rejected() {
        for kind in [Kind::Boolean, Kind::Int, Kind::Long, Kind::Float] {
            let err = FieldDescriptor::new("f", None, kind, None).unwrap_err();
            assert!(matches!(err, Error::MissingDefault { .. }), "{kind}");
        }
    }

    #[test]
    fn default_of_wrong_kind_rejected() {
        let err = FieldDescriptor::new("clicks", None, Kind::Int, Some(PrefValue::Long(0)))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DefaultKindMismatch {
                expected: Kind::Int,
                found: Kind::Long,
                ..
            }
        ));
    }

    #[test]
    fn invalid_key_rejected() {
        let err = FieldDescriptor::new("f", Some(""), Kind::Int, Some(PrefValue::Int(0))).unwrap_err();
        assert!(matches!(err, Error::Store(typedprefs_kv_store::Error::Key(_))));
    }

    #[test]
    fn unsupported_kind_fails_at_declaration() {
        let err = FieldDescriptor::parse("ratio", None, "double", Some("0.5")).unwrap_err();
        assert!(matches!(
            err,
            Error::Store(typedprefs_kv_store::Error::UnsupportedKind { ref name }) if name == "double"
        ));
    }

    #[test]
    fn parse_textual_declaration() {
        let d = FieldDescriptor::parse("clicks", Some("click_count"), "int", Some("0")).unwrap();
        assert_eq!(d.kind(), Kind::Int);
        assert_eq!(d.default_value(), Some(&PrefValue::Int(0)));

        let d = FieldDescriptor::parse("token", None, "string", None).unwrap();
        assert_eq!(d.default_value(), None);
    }

    #[test]
    fn decode_rejects_other_kinds() {
        let d = FieldDescriptor::new("clicks", None, Kind::Int, Some(PrefValue::Int(0))).unwrap();
        assert_eq!(d.decode(Some(PrefValue::Int(4))).unwrap(), Some(PrefValue::Int(4)));
        assert!(d.decode(Some(PrefValue::from("4"))).is_err());
    }

    #[test]
    fn encode_builds_single_key_edit() {
        let d = FieldDescriptor::new("clicks", Some("click_count"), Kind::Int, Some(PrefValue::Int(0)))
            .unwrap();
        let edit = d.encode(Some(PrefValue::Int(3))).unwrap();
        assert_eq!(
            edit.operations(),
            &[Operation::Put(key!("click_count"), PrefValue::Int(3))]
        );
        assert!(!edit.clears());
    }

    #[test]
    fn encode_absent() {
        let token = FieldDescriptor::new("token", None, Kind::String, None).unwrap();
        let edit = token.encode(None).unwrap();
        assert_eq!(edit.operations(), &[Operation::Remove(key!("token"))]);

        let clicks = FieldDescriptor::new("clicks", None, Kind::Int, Some(PrefValue::Int(0))).unwrap();
        assert!(matches!(
            clicks.encode(None),
            Err(Error::AbsentNotAllowed { .. })
        ));
    }

    #[test]
    fn encode_rejects_wrong_kind() {
        let d = FieldDescriptor::new("clicks", None, Kind::Int, Some(PrefValue::Int(0))).unwrap();
        assert!(matches!(
            d.encode(Some(PrefValue::Boolean(true))),
            Err(Error::WrongValueKind { .. })
        ));
    }

    #[test]
    fn display_shows_default() {
        let d = FieldDescriptor::new("clicks", Some("click_count"), Kind::Int, Some(PrefValue::Int(0)))
            .unwrap();
        assert_eq!(d.to_string(), "clicks (int) @ click_count = 0");
    }
}
