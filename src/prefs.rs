//! Durable key -> bool flags, used for the per-entry caught state.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("preference store lock poisoned")]
    Poisoned,
}

pub trait PreferenceStore: Send + Sync {
    /// Stored flag for `key`, `false` when it was never set.
    fn get(&self, key: &str) -> bool;

    /// Stores `value` and commits it before returning.
    fn set(&self, key: &str, value: bool) -> Result<(), PrefsError>;
}

/// Flags mirrored to a JSON object file, rewritten atomically on every `set`.
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    flags: Mutex<BTreeMap<String, bool>>,
}

impl JsonPreferenceStore {
    /// Opens the store at `path`. A missing or unreadable file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let flags = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "ignoring corrupt preference file");
                BTreeMap::new()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "could not read preference file");
                BTreeMap::new()
            }
        };
        Self {
            path,
            flags: Mutex::new(flags),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, flags: &BTreeMap<String, bool>) -> Result<(), PrefsError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |source: io::Error| PrefsError::Io {
            path: self.path.clone(),
            source,
        };
        fs::create_dir_all(dir).map_err(io_error)?;
        let json = serde_json::to_vec_pretty(flags)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(&json).map_err(io_error)?;
        tmp.as_file().sync_all().map_err(io_error)?;
        tmp.persist(&self.path).map_err(|err| io_error(err.error))?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> bool {
        self.flags
            .lock()
            .map(|flags| flags.get(key).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) -> Result<(), PrefsError> {
        let mut flags = self.flags.lock().map_err(|_| PrefsError::Poisoned)?;
        // memory only takes the value once the file holds it
        let mut next = flags.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *flags = next;
        Ok(())
    }
}

/// In-process store with no backing file.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    flags: Mutex<BTreeMap<String, bool>>,
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> bool {
        self.flags
            .lock()
            .map(|flags| flags.get(key).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    fn set(&self, key: &str, value: bool) -> Result<(), PrefsError> {
        let mut flags = self.flags.lock().map_err(|_| PrefsError::Poisoned)?;
        flags.insert(key.to_string(), value);
        Ok(())
    }
}
