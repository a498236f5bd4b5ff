use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::model::{AnswerRecord, CategoryFilter, HistoryEntry, Question};
use quiz_core::time::ElapsedTime;

use super::plan::QuizBuilder;
use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a session stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Showing question `index`; `answered` once a submission was recorded.
    InProgress { index: usize, answered: bool },
    /// Every question has been passed.
    Complete,
}

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Results of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub entry: HistoryEntry,
    pub elapsed: ElapsedTime,
    pub answers: Vec<AnswerRecord>,
}

impl QuizOutcome {
    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.entry.score()
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.entry.correct_count()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.entry.total_questions()
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt over a fixed, shuffled question subset.
///
/// Steps through questions in order. Each question takes at most one answer;
/// the session is complete once the index passes the last question.
pub struct QuizSession {
    category: CategoryFilter,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    answers: Vec<AnswerRecord>,
    answered_current: bool,
    started_at: DateTime<Utc>,
    history_saved: bool,
}

impl QuizSession {
    /// Create a session over an already selected question list.
    #[must_use]
    pub fn new(
        category: CategoryFilter,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            questions,
            current: 0,
            score: 0,
            answers: Vec::new(),
            answered_current: false,
            started_at,
            history_saved: false,
        }
    }

    /// Sample up to `sample_size` questions matching `category` and start at
    /// the first one.
    ///
    /// An empty match produces an empty session that is already complete.
    pub fn start<R: Rng + ?Sized>(
        category: CategoryFilter,
        bank: &[Question],
        sample_size: usize,
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let plan = QuizBuilder::new(bank)
            .with_sample_size(sample_size)
            .build(category, rng);
        tracing::debug!(
            %category,
            available = plan.available,
            drawn = plan.total(),
            "questions drawn"
        );
        Self::new(category, plan.questions, started_at)
    }

    #[must_use]
    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn history_saved(&self) -> bool {
        self.history_saved
    }

    /// The question being shown, or `None` once the session is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// True when the current question already has a recorded answer.
    #[must_use]
    pub fn is_current_answered(&self) -> bool {
        !self.is_complete() && self.answered_current
    }

    /// The answer recorded for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerRecord> {
        if self.is_current_answered() {
            self.answers.last()
        } else {
            None
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_complete() {
            QuizPhase::Complete
        } else {
            QuizPhase::InProgress {
                index: self.current,
                answered: self.answered_current,
            }
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.total_questions(),
            position: self.current,
            answered: self.answers.len(),
            correct: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Grade `selected` against the current question.
    ///
    /// Returns `None` without touching the session when nothing is selected,
    /// the index is not one of the question's options, the current question
    /// was already answered, or the session is complete.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Option<&AnswerRecord> {
        let selected = selected?;
        if self.answered_current {
            return None;
        }
        let question = self.current_question()?;
        if !question.has_option(selected) {
            return None;
        }

        let record = AnswerRecord::grade(question, selected);
        if record.is_correct {
            self.score += 1;
        }
        self.answers.push(record);
        self.answered_current = true;
        self.answers.last()
    }

    /// Move to the next question. Once complete, further calls change nothing.
    pub fn advance(&mut self) -> QuizPhase {
        if self.current < self.questions.len() {
            self.current += 1;
            self.answered_current = false;
        }
        self.phase()
    }

    /// Summarize the session as of `completed_at`.
    ///
    /// The percentage is taken over every question in the session, so
    /// unanswered questions count as wrong. An empty session scores 0%.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::History` if the counts cannot form a history entry.
    pub fn finalize(&self, completed_at: DateTime<Utc>) -> Result<QuizOutcome, QuizError> {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let entry = HistoryEntry::new(completed_at, self.category, self.score, total)?;

        Ok(QuizOutcome {
            entry,
            elapsed: ElapsedTime::between(self.started_at, completed_at),
            answers: self.answers.clone(),
        })
    }

    /// Restart with the same questions in the same order.
    pub fn retry(&mut self, started_at: DateTime<Utc>) {
        self.current = 0;
        self.score = 0;
        self.answers.clear();
        self.answered_current = false;
        self.started_at = started_at;
        self.history_saved = false;
    }

    pub(crate) fn mark_history_saved(&mut self) {
        self.history_saved = true;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("category", &self.category)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("score", &self.score)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .field("history_saved", &self.history_saved)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
