//! Validated store keys.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest key accepted, in bytes.
pub const MAX_KEY_LEN: usize = 256;

/// Errors related to key validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("key must not be empty")]
    Empty,
    #[error("key '{key}' is {len} bytes long, limit is {MAX_KEY_LEN}")]
    TooLong { key: String, len: usize },
    #[error("invalid character {character:?} at position {position} in key '{key}'")]
    InvalidCharacter {
        key: String,
        character: char,
        position: usize,
    },
}

/// A validated key in a preference store.
///
/// Keys are non-empty strings of at most [`MAX_KEY_LEN`] bytes without
/// control characters. Anything else a platform store accepts as a key is
/// accepted here.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    /// Parse a key string, validating it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use typedprefs_kv_store::Key;
    ///
    /// let key = Key::parse("click_count").unwrap();
    /// assert_eq!(key.as_str(), "click_count");
    ///
    /// assert!(Key::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        Self::validate(s)?;
        Ok(Key(s.to_string()))
    }

    fn validate(s: &str) -> Result<(), KeyError> {
        if s.is_empty() {
            return Err(KeyError::Empty);
        }

        if s.len() > MAX_KEY_LEN {
            return Err(KeyError::TooLong {
                key: s.to_string(),
                len: s.len(),
            });
        }

        if let Some((position, character)) = s.chars().enumerate().find(|(_, c)| c.is_control())
        {
            return Err(KeyError::InvalidCharacter {
                key: s.to_string(),
                character,
                position,
            });
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}

impl TryFrom<String> for Key {
    type Error = KeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Key(s))
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Key::try_from(s).map_err(serde::de::Error::custom)
    }
}

/// Macro for creating keys from literals.
///
/// # Example
///
/// ```rust
/// use typedprefs_kv_store::key;
///
/// let k = key!("api_token");
/// assert_eq!(k.as_str(), "api_token");
/// ```
#[macro_export]
macro_rules! key {
    ($s:expr) => {
        $crate::Key::parse($s).expect("invalid key literal")
    };
}
