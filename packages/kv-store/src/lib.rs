//! Key-value store contract for typedprefs.
//!
//! This layer describes the persistent store that typed preferences sit on:
//! - `Key`: Validated store key
//! - `Namespace`: Validated name of an isolated store partition
//! - `PrefValue`: One primitive value tagged with its `Kind`
//! - `Edit`: A batch of puts, removes and an optional clear, applied on commit
//!
//! Stores implement `Reader` and `Writer`. Environments resolve a `Namespace`
//! to a private store instance.
//!
//! # Example
//!
//! ```rust
//! use typedprefs_kv_store::{key, Edit, Error, Key, PrefValue, Reader, ReaderExt, Writer};
//!
//! fn bump(store: &mut (impl Reader + Writer)) -> Result<i32, Error> {
//!     let clicks = store.get_int(&key!("click_count"), 0)? + 1;
//!     store.commit(Edit::new().put_int(key!("click_count"), clicks))?;
//!     Ok(clicks)
//! }
//! ```

mod edit;
mod environment;
mod error;
mod key;
mod namespace;
mod shared;
mod traits;
mod value;

pub use edit::{Edit, Operation};
pub use environment::Environment;
pub use error::Error;
pub use key::{Key, KeyError};
pub use namespace::Namespace;
pub use shared::SharedStore;
pub use traits::{Reader, ReaderExt, Store, Writer};
pub use value::{Kind, PrefValue};
