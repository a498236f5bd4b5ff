use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::category::{CategoryFilter, category_label};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryEntryError {
    #[error("correct count ({correct}) exceeds total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("score must be within 0..=100, got {0}")]
    ScoreOutOfRange(u32),
}

/// Rounded percentage of `correct` out of `total`, halves rounding up.
///
/// Returns 0 when `total` is 0.
#[must_use]
pub fn percentage(correct: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (correct.saturating_mul(200) + total) / total.saturating_mul(2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Persisted outcome of one completed quiz session.
///
/// The category is kept as the raw tag so entries written with tags this
/// build does not know still load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    date: DateTime<Utc>,
    category: String,
    score: u32,
    correct_count: u32,
    total_questions: u32,
}

impl HistoryEntry {
    /// Build an entry for a finished session, deriving the percentage score.
    ///
    /// # Errors
    ///
    /// Returns `HistoryEntryError::CorrectExceedsTotal` if more answers were
    /// correct than questions were asked.
    pub fn new(
        date: DateTime<Utc>,
        category: CategoryFilter,
        correct_count: u32,
        total_questions: u32,
    ) -> Result<Self, HistoryEntryError> {
        let score = percentage(u64::from(correct_count), u64::from(total_questions));
        Self::from_persisted(date, category.as_str(), score, correct_count, total_questions)
    }

    /// Rehydrate an entry from storage.
    ///
    /// # Errors
    ///
    /// Returns `HistoryEntryError` if the counts or score are inconsistent.
    pub fn from_persisted(
        date: DateTime<Utc>,
        category: impl Into<String>,
        score: u32,
        correct_count: u32,
        total_questions: u32,
    ) -> Result<Self, HistoryEntryError> {
        if correct_count > total_questions {
            return Err(HistoryEntryError::CorrectExceedsTotal {
                correct: correct_count,
                total: total_questions,
            });
        }
        if score > 100 {
            return Err(HistoryEntryError::ScoreOutOfRange(score));
        }

        Ok(Self {
            date,
            category: category.into(),
            score,
            correct_count,
            total_questions,
        })
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Raw category tag as stored.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn category_label(&self) -> &str {
        category_label(&self.category)
    }

    /// The filter the entry was recorded under, if the tag is a known one.
    #[must_use]
    pub fn category_filter(&self) -> Option<CategoryFilter> {
        self.category.parse().ok()
    }

    /// Percentage score, 0..=100.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }
}

/// Totals across every stored history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryAggregate {
    pub total_questions: u64,
    pub correct_answers: u64,
    pub accuracy: u32,
}

impl HistoryAggregate {
    #[must_use]
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let (total_questions, correct_answers) =
            entries.iter().fold((0_u64, 0_u64), |(total, correct), e| {
                (
                    total + u64::from(e.total_questions),
                    correct + u64::from(e.correct_count),
                )
            });

        Self {
            total_questions,
            correct_answers,
            accuracy: percentage(correct_answers, total_questions),
        }
    }
}
