//! Persistent key/value storage for system details
//!
//! Details are stored under `sysgen:{version}:{id}` keys. [`FileDetailStore`]
//! keeps one JSON file per key inside a directory; [`MemoryDetailStore`] is
//! used in tests and when no directory is available.
//!
//! [`DetailCache`] sits on top of a store and never surfaces errors: a failed
//! read behaves like a missing entry, a failed write is logged.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::details::{generate_details, SystemDetails, SYSGEN_VERSION};
use crate::error::DetailStoreError;

/// Storage key for a system's details
pub fn detail_key(id: &str) -> String {
    format!("sysgen:{}:{}", SYSGEN_VERSION, id)
}

/// Filename-safe form of an id or key
///
/// Bytes outside `[A-Za-z0-9_-]` are percent-encoded, so distinct inputs map
/// to distinct names and none can contain a path separator.
pub fn file_safe(text: &str) -> String {
    let mut name = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("%{:02X}", byte));
        }
    }
    name
}

/// Raw string storage keyed by [`detail_key`]
pub trait DetailStore {
    /// Read the raw value for a key, `Ok(None)` when absent
    fn get(&self, key: &str) -> Result<Option<String>, DetailStoreError>;

    /// Write the raw value for a key
    fn put(&mut self, key: &str, value: &str) -> Result<(), DetailStoreError>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryDetailStore {
    entries: HashMap<String, String>,
}

impl MemoryDetailStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DetailStore for MemoryDetailStore {
    fn get(&self, key: &str) -> Result<Option<String>, DetailStoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), DetailStoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed store, one `.json` file per key
#[derive(Debug, Clone)]
pub struct FileDetailStore {
    dir: PathBuf,
}

impl FileDetailStore {
    /// Use `dir` as the backing directory, creating it if needed
    pub fn open<P: Into<PathBuf>>(dir: P) -> Result<Self, DetailStoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("Detail store at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_safe(key)))
    }
}

impl DetailStore for FileDetailStore {
    fn get(&self, key: &str) -> Result<Option<String>, DetailStoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), DetailStoreError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Details access for the viewer
pub struct DetailCache {
    store: Box<dyn DetailStore>,
}

impl DetailCache {
    pub fn new(store: Box<dyn DetailStore>) -> Self {
        Self { store }
    }

    /// Cache backed by memory only
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryDetailStore::new()))
    }

    /// Cache backed by a directory, or memory if the directory can't be used
    pub fn open_or_memory<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        match FileDetailStore::open(&dir) {
            Ok(store) => Self::new(Box::new(store)),
            Err(e) => {
                log::warn!("Cannot use detail directory '{}': {}. Details will not persist.", dir.display(), e);
                Self::in_memory()
            }
        }
    }

    fn try_cached(&self, id: &str) -> Result<Option<SystemDetails>, DetailStoreError> {
        match self.store.get(&detail_key(id))? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Stored details for a system, if any
    pub fn cached(&self, id: &str) -> Option<SystemDetails> {
        match self.try_cached(id) {
            Ok(details) => details,
            Err(e) => {
                log::warn!("Ignoring stored details for {}: {}", id, e);
                None
            }
        }
    }

    /// Store details for a system
    pub fn store(&mut self, id: &str, details: &SystemDetails) {
        let result = serde_json::to_string(details)
            .map_err(DetailStoreError::from)
            .and_then(|raw| self.store.put(&detail_key(id), &raw));
        if let Err(e) = result {
            log::warn!("Failed to store details for {}: {}", id, e);
        }
    }

    /// Stored details, generating them on first access
    ///
    /// Generated details are only stored when no entry exists. An entry that
    /// can't be read or parsed is left in place and shadowed by generated
    /// details for this call.
    pub fn ensure(&mut self, id: &str) -> SystemDetails {
        let existing = self.try_cached(id);
        if let Ok(Some(details)) = existing {
            return details;
        }
        let details = generate_details(id);
        match existing {
            Ok(_) => {
                log::debug!("Generated details for {}", id);
                self.store(id, &details);
            }
            Err(e) => log::warn!("Keeping unreadable details for {} ({}), showing generated ones", id, e),
        }
        details
    }

    /// Write stored details to `system_{id}_{version}.json` in `dir`, with the
    /// id passed through [`file_safe`]
    ///
    /// Returns the written path, or `None` when nothing is stored or the write
    /// failed.
    pub fn export(&self, id: &str, dir: &Path) -> Option<PathBuf> {
        let details = self.cached(id)?;
        let path = dir.join(format!("system_{}_{}.json", file_safe(id), SYSGEN_VERSION));
        let written = serde_json::to_string_pretty(&details)
            .map_err(DetailStoreError::from)
            .and_then(|json| fs::write(&path, json).map_err(DetailStoreError::from));
        match written {
            Ok(()) => {
                log::info!("Exported details for {} to {}", id, path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("Failed to export details for {}: {}", id, e);
                None
            }
        }
    }
}
