//! # typedprefs-cli
//!
//! Inspect and edit the preferences stored on disk for one namespace.
//!
//! ## Usage
//!
//! ```bash
//! prefs --namespace user_prefs list
//! prefs --namespace user_prefs get click_count --kind int --default 0
//! prefs --namespace user_prefs set api_token --kind string tok-1
//! prefs --namespace user_prefs remove api_token
//! prefs --root /tmp/prefs --namespace user_prefs clear
//! ```
//!
//! The root directory comes from `--root`, then `TYPEDPREFS_HOME`, then the
//! platform data directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use typedprefs::{
    Edit, FieldDescriptor, Key, Kind, PrefValue, Preferences, Reader, ReaderExt, SharedStore,
    Writer,
};
use typedprefs_json_store::{JsonFileStore, LocalDiskEnvironment};

/// prefs - inspect and edit typed preferences
#[derive(Parser, Debug)]
#[command(name = "prefs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding one JSON document per namespace
    #[arg(long, env = "TYPEDPREFS_HOME")]
    pub root: Option<PathBuf>,

    /// Namespace to operate on
    #[arg(long, short)]
    pub namespace: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the value stored under a key
    Get {
        key: String,
        /// Read the key as this kind (boolean, int, long, float, string)
        #[arg(long)]
        kind: Option<String>,
        /// Value to print when the key is absent
        #[arg(long, requires = "kind")]
        default: Option<String>,
    },
    /// Store a value under a key, replacing a value of the same kind
    Set {
        key: String,
        #[arg(long)]
        kind: String,
        value: String,
    },
    /// Remove a key
    Remove { key: String },
    /// List every stored key with its kind and value
    List,
    /// Remove every key in the namespace
    Clear,
}

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Preferences(#[from] typedprefs::Error),

    #[error(transparent)]
    Store(#[from] typedprefs_json_store::Error),

    #[error("no data directory on this platform, pass --root or set TYPEDPREFS_HOME")]
    NoDataDirectory,
}

const ABSENT: &str = "<absent>";

/// The root directory to use when `--root` and `TYPEDPREFS_HOME` are unset.
pub fn default_root() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("typedprefs"))
}

fn parse_key(key: &str) -> Result<Key, CliError> {
    Ok(Key::parse(key).map_err(typedprefs::Error::from)?)
}

/// Run one command and return the lines to print.
pub fn run(args: Args) -> Result<Vec<String>, CliError> {
    let root = match args.root {
        Some(root) => root,
        None => default_root().ok_or(CliError::NoDataDirectory)?,
    };
    log::debug!("Using preferences root {}", root.display());

    let env = LocalDiskEnvironment::new(root)?;
    let mut prefs: Preferences<SharedStore<JsonFileStore>> =
        Preferences::open(&env, &args.namespace)?;

    execute(args.command, &mut prefs)
}

/// Execute a command against opened preferences.
pub fn execute<S>(command: Command, prefs: &mut Preferences<S>) -> Result<Vec<String>, CliError>
where
    S: typedprefs::Store,
{
    match command {
        Command::Get { key, kind: None, .. } => {
            let key = parse_key(&key)?;
            let line = match prefs.store_mut().read(&key)? {
                Some(value) => format!("{} ({})", value, value.kind()),
                None => ABSENT.to_string(),
            };
            Ok(vec![line])
        }
        Command::Get {
            key,
            kind: Some(kind),
            default,
        } => {
            let descriptor = FieldDescriptor::parse(&key, None, &kind, default.as_deref())?;
            let descriptor = prefs.declare_dynamic(
                descriptor.name(),
                None,
                descriptor.kind(),
                descriptor.default_value().cloned(),
            )?;
            let line = match prefs.get_value(&descriptor)? {
                Some(value) => value.to_string(),
                None => ABSENT.to_string(),
            };
            Ok(vec![line])
        }
        Command::Set { key, kind, value } => {
            let kind: Kind = kind.parse()?;
            let value = PrefValue::parse(kind, &value)?;
            let key = parse_key(&key)?;
            let store = prefs.store_mut();
            // A key keeps its kind until it is removed.
            store.read_kind(&key, kind)?;
            store.commit(Edit::new().put(key, value))?;
            Ok(vec![])
        }
        Command::Remove { key } => {
            prefs
                .store_mut()
                .commit(Edit::new().remove(parse_key(&key)?))?;
            Ok(vec![])
        }
        Command::List => {
            let store = prefs.store_mut();
            let mut lines = Vec::new();
            for key in store.keys()? {
                if let Some(value) = store.read(&key)? {
                    lines.push(format!("{} ({}) = {}", key, value.kind(), value));
                }
            }
            Ok(lines)
        }
        Command::Clear => {
            prefs.clear()?;
            Ok(vec![])
        }
    }
}
