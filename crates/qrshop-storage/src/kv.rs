//! Key-value store wrapper with automatic serialization.

use crate::backend::{FileStore, KeyValueStore, MemoryStore};
use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

/// Type-safe cache over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug, Clone)]
pub struct Cache<S = MemoryStore> {
    store: S,
}

impl Cache<MemoryStore> {
    /// Open a volatile in-memory cache.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Cache<FileStore> {
    /// Open a cache persisted under `dir`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".qrshop")?;
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(FileStore::open(dir)?))
    }
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap an existing store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartRecord> = cache.get("cart-storage")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.store.exists(key)
    }

    /// Get all keys in the cache.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.store.keys()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the cache and return the underlying store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        items: Vec<u32>,
    }

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::in_memory();
        let value: Option<Record> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut cache = Cache::in_memory();
        cache.set("record", &Record { items: vec![1, 2] }).unwrap();

        let value: Option<Record> = cache.get("record").unwrap();
        assert_eq!(value, Some(Record { items: vec![1, 2] }));
        assert!(cache.exists("record").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["record"]);
    }

    #[test]
    fn test_corrupt_record_is_serialize_error() {
        let mut store = MemoryStore::new();
        store.set("record", b"not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Record>, _> = cache.get("record");
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[test]
    fn test_file_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut cache = Cache::open(dir.path()).unwrap();
            cache.set("record", &Record { items: vec![7] }).unwrap();
        }
        let cache = Cache::open(dir.path()).unwrap();
        let value: Option<Record> = cache.get("record").unwrap();
        assert_eq!(value, Some(Record { items: vec![7] }));
    }
}
