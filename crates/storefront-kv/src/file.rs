//! Store persisted as a single JSON object on disk.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{KeyValueStore, KvError};

/// A store that writes through to a JSON file on every change.
///
/// The whole file is rewritten on each `set`/`delete`; it is meant for a
/// handful of preference flags, not bulk data.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, KvError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(KvError::OpenError(format!("{}: {}", path.display(), e)));
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file store");
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then make them the in-memory view.
    ///
    /// On failure the in-memory view is left as it was, so it never holds
    /// a value the file does not.
    fn commit(&self, entries: BTreeMap<String, String>) -> Result<(), KvError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(&entries)?;
        std::fs::write(&self.path, json)?;
        *self.entries.borrow_mut() = entries;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut entries = self.entries.borrow().clone();
        entries.insert(key.to_string(), value.to_string());
        self.commit(entries)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self.entries.borrow().clone();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.commit(entries)
    }
}
