use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{HistoryEntry, percentage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::repository::{HistoryRepository, KeyValueStore, StorageError};

/// Slot name the history list is stored under.
pub const HISTORY_SLOT_KEY: &str = "studyHistory";

/// Number of entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Persisted shape of a history entry.
///
/// Field names match the JSON written to the slot, so the stored list stays
/// readable by any client sharing the same key. The category is an opaque
/// tag and a `null` score is recomputed from the counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryRecord {
    pub date: DateTime<Utc>,
    pub category: String,
    pub score: Option<u32>,
    pub correct_count: u32,
    pub total_questions: u32,
}

impl HistoryEntryRecord {
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.date(),
            category: entry.category().to_owned(),
            score: Some(entry.score()),
            correct_count: entry.correct_count(),
            total_questions: entry.total_questions(),
        }
    }

    /// Convert the record back into a domain entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored counts are inconsistent.
    pub fn into_entry(self) -> Result<HistoryEntry, StorageError> {
        let score = self.score.unwrap_or_else(|| {
            percentage(
                u64::from(self.correct_count),
                u64::from(self.total_questions),
            )
        });
        HistoryEntry::from_persisted(
            self.date,
            self.category,
            score,
            self.correct_count,
            self.total_questions,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Decode the slot contents into entries.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or invalid entries.
pub fn decode_history(raw: &str) -> Result<Vec<HistoryEntry>, StorageError> {
    let records: Vec<HistoryEntryRecord> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    records.into_iter().map(HistoryEntryRecord::into_entry).collect()
}

/// Encode entries into the slot format.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_history(entries: &[HistoryEntry]) -> Result<String, StorageError> {
    let records: Vec<HistoryEntryRecord> =
        entries.iter().map(HistoryEntryRecord::from_entry).collect();
    serde_json::to_string(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// History kept as a single JSON list inside one key-value slot.
pub struct SlotHistoryStore {
    slots: Arc<dyn KeyValueStore>,
    key: String,
    limit: usize,
    // Serializes the read-modify-write in `append`.
    write_lock: Mutex<()>,
}

impl SlotHistoryStore {
    #[must_use]
    pub fn new(slots: Arc<dyn KeyValueStore>) -> Self {
        Self {
            slots,
            key: HISTORY_SLOT_KEY.to_owned(),
            limit: DEFAULT_HISTORY_LIMIT,
            write_lock: Mutex::new(()),
        }
    }

    /// Keep at most `limit` entries (minimum 1).
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    async fn read_entries(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.slots.get_slot(&self.key).await? {
            Some(raw) if !raw.trim().is_empty() => decode_history(&raw),
            _ => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl HistoryRepository for SlotHistoryStore {
    async fn load(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        self.read_entries().await
    }

    async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_entries().await?;
        entries.insert(0, entry.clone());
        let evicted = entries.len().saturating_sub(self.limit);
        entries.truncate(self.limit);

        let raw = encode_history(&entries)?;
        self.slots.put_slot(&self.key, &raw).await?;

        tracing::debug!(
            key = %self.key,
            stored = entries.len(),
            evicted,
            "history entry appended"
        );
        Ok(())
    }
}
