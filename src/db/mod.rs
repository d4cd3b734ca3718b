// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistence layer: a single-slot key-value store holding the workout list.

pub mod file;
pub mod memory;
pub mod snapshot;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage key names as constants.
pub mod keys {
    /// Serialized workout list
    pub const WORKOUTS: &str = "workouts";
}

/// Minimal key-value contract modeled on browser local storage.
///
/// Every `set` is a whole-value overwrite; there is no merge.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Failed to serialize workouts: {0}")]
    Serialization(String),

    #[error("Stored workouts are corrupt: {0}")]
    Corrupt(String),

    #[error("Unsupported workout snapshot version {0}")]
    UnsupportedVersion(u64),
}
