// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file store standing in for browser local storage.
//!
//! All keys live in one JSON object. Writes go to a sibling temp file which is
//! then renamed over the original, so each `set`/`remove` replaces the whole
//! file in one step.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Key-value store persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        tracing::debug!(path = %path.display(), "Opened file store");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(data) if data.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(data) => {
                serde_json::from_str(&data).map_err(|e| StorageError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
