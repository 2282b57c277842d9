use std::collections::HashMap;
use std::sync::Mutex;
use std::{fs, io, path};

use typedprefs_kv_store::{
    Edit, Environment, Error, Key, Namespace, PrefValue, Reader, SharedStore, Writer,
};

use crate::json_utils::{self, Entries};

/// A store backed by one JSON document on local disk.
///
/// Nothing is cached: every read loads the document, so several stores on
/// the same file observe each other's commits. A commit rewrites the whole
/// document through a temporary file that is renamed over the old one,
/// which makes each commit atomic with respect to readers.
pub struct JsonFileStore {
    path: path::PathBuf,
}

impl JsonFileStore {
    /// Create a store for the document at `path`. The file is created on the
    /// first commit.
    pub fn new(path: path::PathBuf) -> Self {
        JsonFileStore { path }
    }

    pub fn path(&self) -> &path::Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, Error> {
        log::debug!("Reading {}...", self.path.display());

        match fs::read(&self.path) {
            Ok(bytes) => json_utils::parse_document(&bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(Error::ImplementationFailure {
                message: format!(
                    "Preference document ({}) could not be read: {}",
                    self.path.display(),
                    err
                ),
            }),
        }
    }

    fn save(&self, entries: &Entries) -> Result<(), Error> {
        use io::Write;

        let bytes = json_utils::render_document(entries)?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| path::Path::new("."));

        log::debug!("Writing {}...", self.path.display());

        // NamedTempFile is created with mode 0600 on unix, and the rename
        // keeps it, so the document stays private to the owner.
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|err| {
            Error::ImplementationFailure {
                message: format!(
                    concat!(
                        "Temporary file for preference document ({}) could not be ",
                        "created: {}"
                    ),
                    self.path.display(),
                    err
                ),
            }
        })?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| Error::ImplementationFailure {
            message: format!(
                "Preference document ({}) could not be replaced: {}",
                self.path.display(),
                err.error
            ),
        })?;

        Ok(())
    }
}

impl Reader for JsonFileStore {
    fn read(&mut self, key: &Key) -> Result<Option<PrefValue>, Error> {
        Ok(self.load()?.remove(key))
    }

    fn keys(&mut self) -> Result<Vec<Key>, Error> {
        Ok(self.load()?.into_keys().collect())
    }
}

impl Writer for JsonFileStore {
    fn commit(&mut self, edit: Edit) -> Result<(), Error> {
        if edit.is_empty() {
            return Ok(());
        }

        let mut entries = if edit.clears() {
            Entries::new()
        } else {
            self.load()?
        };
        edit.apply_to(&mut entries);

        if entries.is_empty() && !self.path.exists() {
            // Nothing was ever written and nothing is left to write.
            return Ok(());
        }

        self.save(&entries)
    }
}

/// An environment that keeps one JSON document per namespace under a root
/// directory: `<root>/<namespace>.json`.
///
/// Opening a namespace again returns a handle to the same store, so every
/// handle in this process commits through one lock per document.
pub struct LocalDiskEnvironment {
    root: path::PathBuf,
    stores: Mutex<HashMap<Namespace, SharedStore<JsonFileStore>>>,
}

impl LocalDiskEnvironment {
    /// Use `root` as the home of all namespaces, creating it if needed.
    ///
    /// A newly created root is only accessible by its owner on unix. A root
    /// that is unusable (not a directory, read-only) is reported by
    /// [`open`](Environment::open) as [`Error::NamespaceOpen`].
    pub fn new(root: path::PathBuf) -> Result<LocalDiskEnvironment, Error> {
        if !root.exists() {
            log::debug!("Creating preference root {}...", root.display());
            create_private_dir(&root)?;
        }

        Ok(LocalDiskEnvironment {
            root: root.canonicalize()?,
            stores: Mutex::new(HashMap::new()),
        })
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    /// Where the document of `namespace` lives.
    pub fn document_path(&self, namespace: &Namespace) -> path::PathBuf {
        self.root.join(format!("{}.json", namespace))
    }

    /// Names of the namespaces that have a document on disk, sorted.
    pub fn namespaces(&self) -> Result<Vec<Namespace>, Error> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry_path = entry?.path();
            if entry_path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(ns) = entry_path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Namespace::parse(s).ok())
            {
                names.push(ns);
            }
        }
        names.sort();
        Ok(names)
    }

    fn check_root(&self) -> Result<(), String> {
        let attr = fs::metadata(&self.root).map_err(|err| {
            format!(
                "root directory ({}) is not accessible: {}",
                self.root.display(),
                err
            )
        })?;
        if !attr.is_dir() {
            return Err(format!(
                "root path ({}) is not a directory",
                self.root.display()
            ));
        }
        if attr.permissions().readonly() {
            return Err(format!(
                "root directory ({}) is not writable",
                self.root.display()
            ));
        }
        Ok(())
    }
}

impl Environment for LocalDiskEnvironment {
    type Store = SharedStore<JsonFileStore>;

    fn open(&self, namespace: &Namespace) -> Result<Self::Store, Error> {
        let open_failure = |message: String| Error::NamespaceOpen {
            namespace: namespace.to_string(),
            message,
        };

        self.check_root().map_err(open_failure)?;

        let store = {
            let mut stores = self
                .stores
                .lock()
                .map_err(|_| open_failure("environment lock poisoned".to_string()))?;
            stores
                .entry(namespace.clone())
                .or_insert_with(|| {
                    log::debug!("Opening on-disk namespace {}", namespace);
                    SharedStore::new(JsonFileStore::new(self.document_path(namespace)))
                })
                .clone()
        };

        // Surface an unreadable document now rather than on first access.
        store
            .lock()
            .and_then(|file| file.load())
            .map_err(|err| open_failure(err.to_string()))?;

        Ok(store)
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &path::Path) -> Result<(), Error> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &path::Path) -> Result<(), Error> {
    fs::create_dir_all(dir)?;
    Ok(())
}
