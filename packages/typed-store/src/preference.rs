//! Rust types that can back a preference field.

use typedprefs_kv_store::{Kind, PrefValue};

mod sealed {
    pub trait Sealed {}

    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for Option<String> {}
}

/// A Rust type a preference field can hold.
///
/// Implemented for `bool`, `i32`, `i64`, `f32` and `Option<String>`, the
/// kinds a preference store understands. The trait is sealed, so declaring
/// a field of any other type fails to compile.
pub trait Preference: Sized + sealed::Sealed {
    /// The store kind values of this type are written as.
    const KIND: Kind;

    /// Encode for storage. `None` means the entry should not exist.
    fn into_stored(self) -> Option<PrefValue>;

    /// Decode what the store holds, `None` when it cannot be represented as
    /// `Self`.
    fn from_stored(value: Option<PrefValue>) -> Option<Self>;
}

impl Preference for bool {
    const KIND: Kind = Kind::Boolean;

    fn into_stored(self) -> Option<PrefValue> {
        Some(PrefValue::Boolean(self))
    }

    fn from_stored(value: Option<PrefValue>) -> Option<Self> {
        value?.as_bool()
    }
}

impl Preference for i32 {
    const KIND: Kind = Kind::Int;

    fn into_stored(self) -> Option<PrefValue> {
        Some(PrefValue::Int(self))
    }

    fn from_stored(value: Option<PrefValue>) -> Option<Self> {
        value?.as_int()
    }
}

impl Preference for i64 {
    const KIND: Kind = Kind::Long;

    fn into_stored(self) -> Option<PrefValue> {
        Some(PrefValue::Long(self))
    }

    fn from_stored(value: Option<PrefValue>) -> Option<Self> {
        value?.as_long()
    }
}

impl Preference for f32 {
    const KIND: Kind = Kind::Float;

    fn into_stored(self) -> Option<PrefValue> {
        Some(PrefValue::Float(self))
    }

    fn from_stored(value: Option<PrefValue>) -> Option<Self> {
        value?.as_float()
    }
}

impl Preference for Option<String> {
    const KIND: Kind = Kind::String;

    fn into_stored(self) -> Option<PrefValue> {
        self.map(PrefValue::String)
    }

    fn from_stored(value: Option<PrefValue>) -> Option<Self> {
        match value {
            None => Some(None),
            Some(PrefValue::String(s)) => Some(Some(s)),
            Some(_) => None,
        }
    }
}

/// Preference types with a natural absent value, usable without an explicit
/// default.
pub trait OptionalPreference: Preference {
    fn absent() -> Self;
}

impl OptionalPreference for Option<String> {
    fn absent() -> Self {
        None
    }
}
