//! Reading and writing the JSON document that backs one namespace.
//!
//! A document is a JSON object mapping each key to its tagged value:
//!
//! ```json
//! {
//!     "api_token": { "kind": "string", "value": "tok-1" },
//!     "click_count": { "kind": "int", "value": 3 }
//! }
//! ```

use std::collections::BTreeMap;

use typedprefs_kv_store::{Error, Key, PrefValue};

/// The entries of one namespace, ordered by key.
pub type Entries = BTreeMap<Key, PrefValue>;

/// Parse a document. Empty input is an empty namespace.
pub fn parse_document(bytes: &[u8]) -> Result<Entries, Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Entries::new());
    }

    serde_json::from_slice(bytes).map_err(|err| Error::Serialization {
        message: format!("Failed to parse preference document: {}", err),
    })
}

/// Render a document, refusing values JSON cannot represent.
pub fn render_document(entries: &Entries) -> Result<Vec<u8>, Error> {
    check_representable(entries)?;

    let mut bytes = serde_json::to_vec_pretty(entries).map_err(|err| Error::Serialization {
        message: format!("Failed to render preference document: {}", err),
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// JSON has no NaN or infinities, so such floats would not survive a reload.
pub fn check_representable(entries: &Entries) -> Result<(), Error> {
    for (key, value) in entries {
        if let PrefValue::Float(f) = value {
            if !f.is_finite() {
                return Err(Error::Serialization {
                    message: format!("float value {} under '{}' cannot be stored as JSON", f, key),
                });
            }
        }
    }
    Ok(())
}
