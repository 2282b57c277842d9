use typedprefs_kv_store::Kind;

/// Errors from declaring or accessing preference fields.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The underlying store or environment failed.
    #[error(transparent)]
    Store(#[from] typedprefs_kv_store::Error),

    /// Only string fields may be declared without a default.
    #[error("field '{field}' of kind {kind} needs a default value")]
    MissingDefault { field: String, kind: Kind },

    #[error("default of field '{field}' has kind {found}, field is declared as {expected}")]
    DefaultKindMismatch {
        field: String,
        expected: Kind,
        found: Kind,
    },

    #[error("value for field '{field}' has kind {found}, field is declared as {expected}")]
    WrongValueKind {
        field: String,
        expected: Kind,
        found: Kind,
    },

    /// Only string fields can be set to the absent value.
    #[error("field '{field}' of kind {kind} cannot be set to an absent value")]
    AbsentNotAllowed { field: String, kind: Kind },

    #[error("field '{field}' is already declared differently")]
    DuplicateField { field: String },

    /// One key may only ever be read and written as one kind.
    #[error("key '{key}' is already declared as {existing}, cannot redeclare it as {requested}")]
    KindConflict {
        key: String,
        existing: Kind,
        requested: Kind,
    },

    #[error("field '{field}' is not declared on these preferences")]
    UndeclaredField { field: String },
}

impl From<typedprefs_kv_store::KeyError> for Error {
    fn from(e: typedprefs_kv_store::KeyError) -> Self {
        Error::Store(e.into())
    }
}
