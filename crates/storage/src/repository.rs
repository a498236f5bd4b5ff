use async_trait::async_trait;
use quiz_core::model::{HistoryAggregate, HistoryEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::history::{DEFAULT_HISTORY_LIMIT, SlotHistoryStore};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Named string slots, the persistence medium behind the history store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. An unset key is
    /// `Ok(None)`, not an error.
    async fn get_slot(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn put_slot(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Rolling, most-recent-first history of completed quiz sessions.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// All stored entries, newest first. Empty when nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the stored data is corrupt.
    async fn load(&self) -> Result<Vec<HistoryEntry>, StorageError>;

    /// Prepend `entry`, evict anything past the retention limit, and persist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read back or written.
    async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError>;

    /// Totals and accuracy across every stored entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if loading fails.
    async fn aggregate(&self) -> Result<HistoryAggregate, StorageError> {
        let entries = self.load().await?;
        Ok(HistoryAggregate::from_entries(&entries))
    }
}

/// Simple in-memory slot store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn KeyValueStore>,
    pub history: Arc<dyn HistoryRepository>,
}

impl Storage {
    /// Keep history in `slots`, retaining at most `history_limit` entries.
    #[must_use]
    pub fn from_slots(slots: Arc<dyn KeyValueStore>, history_limit: usize) -> Self {
        let history: Arc<dyn HistoryRepository> =
            Arc::new(SlotHistoryStore::new(Arc::clone(&slots)).with_limit(history_limit));
        Self { slots, history }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::in_memory_with_limit(DEFAULT_HISTORY_LIMIT)
    }

    #[must_use]
    pub fn in_memory_with_limit(history_limit: usize) -> Self {
        Self::from_slots(Arc::new(InMemoryRepository::new()), history_limit)
    }
}
