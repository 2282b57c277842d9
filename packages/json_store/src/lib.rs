//! Store implementations for typedprefs.
//!
//! - `InMemoryStore` / `MemoryEnvironment`: entries kept in memory, one
//!   shared store per namespace for the lifetime of the environment
//! - `JsonFileStore` / `LocalDiskEnvironment`: one JSON document per
//!   namespace under a root directory, replaced atomically on every commit
//!
//! Both environments hand out a [`SharedStore`] per namespace, so handles
//! opened on one namespace in this process commit through the same lock.
//!
//! # Example
//!
//! ```rust
//! use typedprefs_json_store::{Environment, LocalDiskEnvironment, Namespace};
//! use typedprefs_kv_store::{key, Edit, ReaderExt, Writer};
//!
//! let dir = tempfile::TempDir::new().unwrap();
//! let env = LocalDiskEnvironment::new(dir.path().join("prefs")).unwrap();
//!
//! let mut store = env.open(&Namespace::parse("user_prefs").unwrap()).unwrap();
//! store.commit(Edit::new().put_int(key!("click_count"), 3)).unwrap();
//!
//! assert_eq!(store.get_int(&key!("click_count"), 0).unwrap(), 3);
//! ```

pub mod in_memory;
pub mod json_utils;
pub mod local_disk;

pub use typedprefs_kv_store::{
    Environment, Error, Key, Namespace, PrefValue, Reader, SharedStore, Writer,
};

pub use in_memory::{InMemoryStore, MemoryEnvironment};
pub use local_disk::{JsonFileStore, LocalDiskEnvironment};
