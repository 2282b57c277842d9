//! Primitive preference values and their kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The kinds of value a preference store can hold.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// 32-bit floating point.
    Float,
    String,
}

impl Kind {
    pub const ALL: [Kind; 5] = [Kind::Boolean, Kind::Int, Kind::Long, Kind::Float, Kind::String];

    pub fn name(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::String => "string",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = Error;

    /// Parse a kind name. Anything outside the supported set is
    /// [`Error::UnsupportedKind`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::UnsupportedKind {
                name: s.to_string(),
            })
    }
}

/// A single stored preference value.
///
/// Serialized as `{"kind": "<kind>", "value": <value>}` so the kind survives
/// formats that cannot tell an `int` from a `long`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PrefValue {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    String(String),
}

impl PrefValue {
    pub fn kind(&self) -> Kind {
        match self {
            PrefValue::Boolean(_) => Kind::Boolean,
            PrefValue::Int(_) => Kind::Int,
            PrefValue::Long(_) => Kind::Long,
            PrefValue::Float(_) => Kind::Float,
            PrefValue::String(_) => Kind::String,
        }
    }

    /// Parse the textual form of a value of the given kind.
    ///
    /// ```rust
    /// use typedprefs_kv_store::{Kind, PrefValue};
    ///
    /// assert_eq!(PrefValue::parse(Kind::Int, "3").unwrap(), PrefValue::Int(3));
    /// assert!(PrefValue::parse(Kind::Int, "three").is_err());
    /// ```
    pub fn parse(kind: Kind, text: &str) -> Result<Self, Error> {
        let invalid = |message: String| Error::InvalidValue { kind, message };

        match kind {
            Kind::Boolean => text
                .parse()
                .map(PrefValue::Boolean)
                .map_err(|e| invalid(format!("{text:?}: {e}"))),
            Kind::Int => text
                .parse()
                .map(PrefValue::Int)
                .map_err(|e| invalid(format!("{text:?}: {e}"))),
            Kind::Long => text
                .parse()
                .map(PrefValue::Long)
                .map_err(|e| invalid(format!("{text:?}: {e}"))),
            Kind::Float => text
                .parse()
                .map(PrefValue::Float)
                .map_err(|e| invalid(format!("{text:?}: {e}"))),
            Kind::String => Ok(PrefValue::String(text.to_string())),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrefValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PrefValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            PrefValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            PrefValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PrefValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefValue::Boolean(v) => write!(f, "{v}"),
            PrefValue::Int(v) => write!(f, "{v}"),
            PrefValue::Long(v) => write!(f, "{v}"),
            PrefValue::Float(v) => write!(f, "{v}"),
            PrefValue::String(v) => f.write_str(v),
        }
    }
}

// Conversion from common types

impl From<bool> for PrefValue {
    fn from(v: bool) -> Self {
        PrefValue::Boolean(v)
    }
}

impl From<i32> for PrefValue {
    fn from(v: i32) -> Self {
        PrefValue::Int(v)
    }
}

impl From<i64> for PrefValue {
    fn from(v: i64) -> Self {
        PrefValue::Long(v)
    }
}

impl From<f32> for PrefValue {
    fn from(v: f32) -> Self {
        PrefValue::Float(v)
    }
}

impl From<String> for PrefValue {
    fn from(v: String) -> Self {
        PrefValue::String(v)
    }
}

impl From<&str> for PrefValue {
    fn from(v: &str) -> Self {
        PrefValue::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_parse_back() {
        for kind in Kind::ALL {
            assert_eq!(kind.name().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = "double".parse::<Kind>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind { ref name } if name == "double"));
        assert!(err.to_string().contains("double"));
    }

    #[test]
    fn value_reports_its_kind() {
        assert_eq!(PrefValue::from(true).kind(), Kind::Boolean);
        assert_eq!(PrefValue::from(1i32).kind(), Kind::Int);
        assert_eq!(PrefValue::from(1i64).kind(), Kind::Long);
        assert_eq!(PrefValue::from(1.5f32).kind(), Kind::Float);
        assert_eq!(PrefValue::from("x").kind(), Kind::String);
    }

    #[test]
    fn parse_text_per_kind() {
        assert_eq!(
            PrefValue::parse(Kind::Boolean, "true").unwrap(),
            PrefValue::Boolean(true)
        );
        assert_eq!(
            PrefValue::parse(Kind::Long, "-9000000000").unwrap(),
            PrefValue::Long(-9_000_000_000)
        );
        assert_eq!(
            PrefValue::parse(Kind::Float, "0.25").unwrap(),
            PrefValue::Float(0.25)
        );
        assert_eq!(
            PrefValue::parse(Kind::String, "tok-1").unwrap(),
            PrefValue::String("tok-1".to_string())
        );
    }

    #[test]
    fn parse_rejects_out_of_range_int() {
        let err = PrefValue::parse(Kind::Int, "9000000000").unwrap_err();
        assert!(matches!(err, Error::InvalidValue { kind: Kind::Int, .. }));
    }

    #[test]
    fn accessors_match_only_their_kind() {
        let v = PrefValue::Int(3);
        assert_eq!(v.as_int(), Some(3));
        assert_eq!(v.as_long(), None);
        assert_eq!(v.as_bool(), None);
        assert_eq!(v.as_float(), None);
        assert_eq!(v.as_str(), None);
    }

    #[test]
    fn serialized_form_carries_kind() {
        let json = serde_json::to_value(PrefValue::Long(7)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "long", "value": 7}));

        let back: PrefValue =
            serde_json::from_value(serde_json::json!({"kind": "int", "value": 7})).unwrap();
        assert_eq!(back, PrefValue::Int(7));
    }
}
