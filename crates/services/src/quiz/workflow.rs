use rand::Rng;
use std::sync::Arc;

use quiz_core::model::{AnswerRecord, CategoryFilter, Question, QuizSettings};
use storage::repository::HistoryRepository;

use super::session::{QuizOutcome, QuizPhase, QuizSession};
use crate::Clock;
use crate::error::QuizError;

/// Orchestrates quiz sessions against the question bank and the history store.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    bank: Arc<[Question]>,
    history: Arc<dyn HistoryRepository>,
    settings: QuizSettings,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: impl Into<Arc<[Question]>>,
        history: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            clock,
            bank: bank.into(),
            history,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Start a session for `category` using thread-local randomness.
    #[must_use]
    pub fn start(&self, category: CategoryFilter) -> QuizSession {
        let mut rng = rand::rng();
        self.start_with_rng(category, &mut rng)
    }

    /// Start a session for `category` with a caller-supplied RNG.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        category: CategoryFilter,
        rng: &mut R,
    ) -> QuizSession {
        let sample_size = usize::try_from(self.settings.sample_size()).unwrap_or(usize::MAX);
        let session =
            QuizSession::start(category, &self.bank, sample_size, self.clock.now(), rng);

        if session.total_questions() == 0 {
            tracing::warn!(%category, "no questions match category; session is empty");
        } else {
            tracing::info!(
                %category,
                questions = session.total_questions(),
                "quiz session started"
            );
        }
        session
    }

    /// Grade the current question.
    ///
    /// Returns `None` when the submission is ignored (see
    /// [`QuizSession::submit_answer`]).
    pub fn submit(&self, session: &mut QuizSession, selected: Option<usize>) -> Option<AnswerRecord> {
        let record = session.submit_answer(selected).cloned();
        match &record {
            Some(r) => tracing::debug!(
                question_id = %r.question_id,
                selected = r.selected,
                correct = r.is_correct,
                "answer recorded"
            ),
            None => tracing::debug!(?selected, "submission ignored"),
        }
        record
    }

    pub fn advance(&self, session: &mut QuizSession) -> QuizPhase {
        session.advance()
    }

    /// Summarize a completed session and append it to the history store.
    ///
    /// Each attempt is persisted once; calling again returns the outcome
    /// without writing a second entry.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotComplete` while questions remain, or
    /// `QuizError::Storage` if the history append fails.
    pub async fn finish(&self, session: &mut QuizSession) -> Result<QuizOutcome, QuizError> {
        if !session.is_complete() {
            return Err(QuizError::NotComplete);
        }

        let outcome = session.finalize(self.clock.now())?;
        if !session.history_saved() {
            self.history.append(&outcome.entry).await?;
            session.mark_history_saved();
            tracing::info!(
                category = %outcome.entry.category(),
                score = outcome.percentage(),
                correct = outcome.correct(),
                total = outcome.total(),
                elapsed = %outcome.elapsed,
                "quiz session finished"
            );
        }
        Ok(outcome)
    }

    /// Reset `session` to its first question, keeping the question order.
    pub fn retry(&self, session: &mut QuizSession) {
        session.retry(self.clock.now());
        tracing::info!(questions = session.total_questions(), "quiz session retried");
    }
}
