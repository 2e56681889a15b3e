use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("storage quota exhausted")]
    QuotaExceeded,
}

/// Key-value contract the interactive layer persists through.
///
/// Values are JSON documents as opaque strings; the store never interprets
/// them. Last write wins, no further consistency guarantees.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a value by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::QuotaExceeded` when the store is full, or other
    /// storage errors.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All stored keys starting with `prefix`, in ascending order.
    ///
    /// The prefix is matched literally, not as a pattern.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
}

/// In-memory store for testing and prototyping.
///
/// An optional capacity bounds the number of keys, mimicking a browser-style
/// quota so tests can exercise the non-fatal persistence path.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    capacity: Option<usize>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes of new keys beyond `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            capacity: Some(capacity),
        }
    }

    /// Number of stored keys.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        if let Some(capacity) = self.capacity {
            if !guard.contains_key(key) && guard.len() >= capacity {
                return Err(StorageError::QuotaExceeded);
            }
        }
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        guard.remove(key);
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(guard
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

/// Storage adapter handed to every service, wrapping the backend behind a
/// trait object for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Storage backed by the in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    /// Read and deserialize a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the stored value is not
    /// valid JSON for `T`, or other storage errors.
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Serialize and write a record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the write fails.
    pub async fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        done: bool,
    }

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = InMemoryStore::new();
        store.set("a_week1_x", "{}").await.unwrap();
        assert_eq!(store.get("a_week1_x").await.unwrap().as_deref(), Some("{}"));

        store.remove("a_week1_x").await.unwrap();
        assert_eq!(store.get("a_week1_x").await.unwrap(), None);
        // removing again stays silent
        store.remove("a_week1_x").await.unwrap();
    }

    #[tokio::test]
    async fn prefix_enumeration_is_sorted_and_filtered() {
        let store = InMemoryStore::new();
        store.set("m_week1_quiz-0", "{}").await.unwrap();
        store.set("m_week1_progress", "{}").await.unwrap();
        store.set("m_week2_quiz-0", "{}").await.unwrap();
        store.set("other", "{}").await.unwrap();

        let keys = store.keys_with_prefix("m_week1").await.unwrap();
        assert_eq!(keys, vec!["m_week1_progress", "m_week1_quiz-0"]);
    }

    #[tokio::test]
    async fn quota_rejects_new_keys_but_allows_overwrites() {
        let store = InMemoryStore::with_capacity(1);
        store.set("only", "1").await.unwrap();

        let err = store.set("second", "2").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));

        // existing keys stay writable
        store.set("only", "3").await.unwrap();
        assert_eq!(store.get("only").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn read_json_reports_malformed_records() {
        let storage = Storage::in_memory();
        storage.kv.set("k", "not json").await.unwrap();

        let err = storage.read_json::<Marker>("k").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn json_round_trip_through_storage() {
        let storage = Storage::in_memory();
        storage.write_json("k", &Marker { done: true }).await.unwrap();

        let back: Option<Marker> = storage.read_json("k").await.unwrap();
        assert_eq!(back, Some(Marker { done: true }));

        let missing: Option<Marker> = storage.read_json("absent").await.unwrap();
        assert_eq!(missing, None);
    }
}
