use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{HistoryAggregate, HistoryEntry, category_label};
use storage::repository::HistoryRepository;

use crate::error::QuizError;

/// Presentation-agnostic row for the recent history list.
///
/// Dates stay as timestamps; the caller decides how to format them. Unknown
/// category tags are shown as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryListItem {
    pub date: DateTime<Utc>,
    pub category: String,
    pub category_label: String,
    pub score: u32,
}

impl HistoryListItem {
    #[must_use]
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.date(),
            category: entry.category().to_owned(),
            category_label: category_label(entry.category()).to_owned(),
            score: entry.score(),
        }
    }
}

/// Recent sessions plus lifetime totals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryOverview {
    pub recent: Vec<HistoryListItem>,
    pub stats: HistoryAggregate,
}

/// Read-side facade over the history store.
#[derive(Clone)]
pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
    recent_len: usize,
}

impl HistoryService {
    pub const DEFAULT_RECENT_LEN: usize = 5;

    #[must_use]
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            history,
            recent_len: Self::DEFAULT_RECENT_LEN,
        }
    }

    #[must_use]
    pub fn with_recent_len(mut self, recent_len: usize) -> Self {
        self.recent_len = recent_len;
        self
    }

    /// The newest entries, up to the configured length.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` on repository failures.
    pub async fn recent(&self) -> Result<Vec<HistoryListItem>, QuizError> {
        let entries = self.history.load().await?;
        Ok(entries
            .iter()
            .take(self.recent_len)
            .map(HistoryListItem::from_entry)
            .collect())
    }

    /// Totals across all stored sessions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` on repository failures.
    pub async fn stats(&self) -> Result<HistoryAggregate, QuizError> {
        Ok(self.history.aggregate().await?)
    }

    /// Recent list and totals from a single load.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` on repository failures.
    pub async fn overview(&self) -> Result<HistoryOverview, QuizError> {
        let entries = self.history.load().await?;
        Ok(HistoryOverview {
            recent: entries
                .iter()
                .take(self.recent_len)
                .map(HistoryListItem::from_entry)
                .collect(),
            stats: HistoryAggregate::from_entries(&entries),
        })
    }
}
