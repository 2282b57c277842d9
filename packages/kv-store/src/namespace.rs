//! Namespace names.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::Error;

/// The name of an isolated partition of preference storage.
///
/// Names start with an ASCII letter, digit or underscore, continue with
/// letters, digits, `_`, `.` or `-`, and are at most 128 characters long.
/// That keeps them usable as file stems on every platform.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Parse and validate a namespace name.
    ///
    /// ```rust
    /// use typedprefs_kv_store::Namespace;
    ///
    /// assert!(Namespace::parse("user_prefs").is_ok());
    /// assert!(Namespace::parse("../etc").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, Error> {
        lazy_static! {
            static ref NAMESPACE_NAME: Regex =
                Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.\-]{0,127}$").unwrap();
        }

        if !NAMESPACE_NAME.is_match(name) {
            return Err(Error::InvalidNamespace {
                name: name.to_string(),
                message: concat!(
                    "must start with a letter, digit or underscore and contain only ",
                    "letters, digits, '_', '.' or '-' (at most 128 characters)"
                )
                .to_string(),
            });
        }

        Ok(Namespace(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Namespace {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Namespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Namespace::parse(s)
    }
}
