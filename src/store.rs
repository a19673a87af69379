//! Persistence of user-adjustable preferences.
//!
//! Preferences live under a single namespaced key of a [`KeyValueStore`] as a
//! JSON object. The whole object is read on load and rewritten on every
//! single-field update:
//!
//! ```json
//! { "activeColor": "#1a3d67", "defaultLineWidth": 8, "defaultSize": { "width": "800", "height": "600" } }
//! ```
//!
//! [`PreferenceStore`] never returns storage errors to its caller. Failures are
//! logged and degrade to an empty mapping (on load) or a skipped write (on save).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Default storage key holding the serialized preference mapping.
pub const STORAGE_KEY: &str = "painterro-data";

/// Sparse mapping of option name to persisted value.
pub type Preferences = Map<String, Value>;

// ============================================================================
// Storage Backends
// ============================================================================

/// Errors reported by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend is disabled or cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the backend's capacity.
    #[error("storage quota exceeded ({needed} bytes needed, {available} available)")]
    QuotaExceeded { needed: usize, available: usize },

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An opaque string key-value service.
pub trait KeyValueStore {
    /// Reads the value stored under `key`. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process key-value store.
///
/// An optional quota (in bytes, counted over all stored values) makes `set`
/// fail the way a full browser storage area does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `bytes` would be exceeded.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Seeds the store with a raw value, e.g. one handed over by a web host.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used_without(key));
            if value.len() > available {
                return Err(StorageError::QuotaExceeded {
                    needed: value.len(),
                    available,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store keeping one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<config dir>/<app>`, falling back to `./<app>` when the
    /// platform has no config directory.
    pub fn in_config_dir(app: &str) -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(app))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        Ok(())
    }
}

// ============================================================================
// PreferenceStore
// ============================================================================

/// Loads and saves the preference mapping through a [`KeyValueStore`].
///
/// Holds the in-memory copy of the last mapping it loaded or wrote.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
    cache: Preferences,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    /// Creates a store using the default [`STORAGE_KEY`].
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            key: STORAGE_KEY.to_string(),
            cache: Preferences::new(),
        }
    }

    /// Uses a different namespaced key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reloads the mapping from the backend, replacing the in-memory copy.
    ///
    /// Never fails: a missing key, unparsable data or a backend error yield an
    /// empty mapping.
    pub fn load(&mut self) -> Preferences {
        self.cache = self.read();
        self.cache.clone()
    }

    /// Sets one preference and rewrites the whole mapping.
    ///
    /// The current mapping is re-read first so values written by another
    /// session are kept. A failed write is logged; the new value stays in the
    /// in-memory copy for the rest of the session.
    pub fn save(&mut self, name: &str, value: Value) {
        let mut prefs = self.read();
        prefs.insert(name.to_string(), value);
        self.cache = prefs;

        let json = match serde_json::to_string(&self.cache) {
            Ok(json) => json,
            Err(e) => {
                log::error!("Unable to serialize preferences: {e}");
                return;
            }
        };

        match self.backend.set(&self.key, &json) {
            Ok(()) => log::debug!("Saved preference `{name}` under `{}`", self.key),
            Err(e) => log::error!("Unable to save preferences to storage: {e}"),
        }
    }

    /// The mapping as of the last [`load`](Self::load) or [`save`](Self::save).
    pub fn preferences(&self) -> &Preferences {
        &self.cache
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    fn read(&self) -> Preferences {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Preferences::new(),
            Err(e) => {
                log::error!("Unable to read preferences from storage: {e}");
                return Preferences::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(Value::Null) => Preferences::new(),
            Ok(other) => {
                log::error!("Stored preferences are not an object: {other}");
                Preferences::new()
            }
            Err(e) => {
                log::error!("Unable to parse stored preferences: {e}");
                Preferences::new()
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
