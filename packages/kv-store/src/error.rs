//! Error types for the store layer.

use crate::key::KeyError;
use crate::value::Kind;

/// Errors raised by stores and environments.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Key(#[from] KeyError),

    #[error("invalid namespace '{name}': {message}")]
    InvalidNamespace { name: String, message: String },

    /// A kind name outside boolean, int, long, float and string.
    #[error("unsupported preference kind '{name}'")]
    UnsupportedKind { name: String },

    /// The value stored under `key` has a different kind than requested.
    #[error("value stored under '{key}' has kind {found}, expected {expected}")]
    KindMismatch {
        key: String,
        expected: Kind,
        found: Kind,
    },

    #[error("invalid {kind} value: {message}")]
    InvalidValue { kind: Kind, message: String },

    /// The environment could not resolve or open a namespace.
    #[error("could not open namespace '{namespace}': {message}")]
    NamespaceOpen { namespace: String, message: String },

    #[error("An error occurred while (de)serializing store contents: {message}")]
    Serialization { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("An implementation error occurred: {message}")]
    ImplementationFailure { message: String },
}
