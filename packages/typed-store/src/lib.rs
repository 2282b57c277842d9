//! Typed preferences over a key-value store.
//!
//! This layer turns a plain key-value [`Store`] into a set of named, typed
//! fields with defaults:
//! - `Preference`: The value types a field can have
//! - `Field<T>`: A declared field, bound to one key and one kind
//! - `Preferences<S>`: The store wrapper that declares and accesses fields
//! - `preferences!`: Declares a struct of fields in one go
//!
//! # Example
//!
//! ```rust
//! use typedprefs::preferences;
//! use typedprefs_json_store::MemoryEnvironment;
//!
//! preferences! {
//!     /// What we remember about the user.
//!     pub struct UserPreferences {
//!         api_token: Option<String> => "api_token",
//!         buy_click_count: i32 => "click_count" = 0,
//!         has_data: bool = false,
//!     }
//! }
//!
//! # fn main() -> Result<(), typedprefs::Error> {
//! let env = MemoryEnvironment::new();
//! let mut prefs = UserPreferences::open(&env, "user_prefs")?;
//!
//! prefs.api_token().set(Some("1234".to_string()))?;
//! let token_len = prefs.api_token().get()?.map_or(0, |t| t.len() as i32);
//! prefs.buy_click_count().update(|clicks| clicks + token_len)?;
//!
//! assert_eq!(prefs.buy_click_count().get()?, 4);
//! assert!(!prefs.has_data().get()?);
//! # Ok(())
//! # }
//! ```

mod error;
mod field;
mod macros;
mod preference;
mod preferences;
mod registry;

pub use error::Error;
pub use field::{Field, FieldDescriptor};
pub use preference::{OptionalPreference, Preference};
pub use preferences::{Entry, Preferences};
pub use registry::FieldRegistry;

// Re-export store types for convenience
pub use typedprefs_kv_store::{
    key, Edit, Environment, Key, Kind, Namespace, PrefValue, Reader, ReaderExt, SharedStore,
    Store, Writer,
};
