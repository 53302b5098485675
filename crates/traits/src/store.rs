//! DocumentStore trait for the persistence sink.
//!
//! The engine hands serialized blocks to a store keyed by
//! `container/region/block` ids and never reads its own writes back; the
//! store is an opaque key-value sink owned by the surrounding application.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for store operations.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Shared stored payload (reference-counted bytes).
pub type SharedStoreData = Arc<Vec<u8>>;

/// A key-value sink for serialized documents.
pub trait DocumentStore: Send + Sync + Debug {
    /// Stores `data` under `key`, replacing any previous value.
    fn put(&self, key: &str, data: Vec<u8>) -> Result<(), StoreError>;

    /// Loads the value stored under `key`.
    fn get(&self, key: &str) -> Result<SharedStoreData, StoreError>;

    /// Removes every key starting with `prefix`, returning how many were removed.
    fn remove_prefix(&self, prefix: &str) -> Result<usize, StoreError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory document store.
///
/// Works in any environment and is what tests and the CLI use.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    entries: RwLock<HashMap<String, SharedStoreData>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns all keys in sorted order.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .read()
            .map(|e| e.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Get the number of stored entries.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.entries.read().map(|e| e.is_empty()).unwrap_or(true)
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn put(&self, key: &str, data: Vec<u8>) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::WriteFailed {
            key: key.to_string(),
            message: "document store lock poisoned".to_string(),
        })?;
        entries.insert(key.to_string(), Arc::new(data));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<SharedStoreData, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::NotFound(key.to_string()))?;
        entries
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    fn remove_prefix(&self, prefix: &str) -> Result<usize, StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::WriteFailed {
            key: prefix.to_string(),
            message: "document store lock poisoned".to_string(),
        })?;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }

    fn name(&self) -> &'static str {
        "InMemoryDocumentStore"
    }
}
