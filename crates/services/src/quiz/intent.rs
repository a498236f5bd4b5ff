use quiz_core::model::{AnswerRecord, CategoryFilter};

use super::session::{QuizOutcome, QuizPhase, QuizSession};
use super::view::{QuestionView, ResultView};
use super::workflow::QuizLoopService;
use crate::error::QuizError;

/// A discrete user action against the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizIntent {
    Start(CategoryFilter),
    Select(usize),
    Submit,
    Next,
    Retry,
    Quit,
}

/// What a dispatched intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Started { total: usize },
    Selected(usize),
    Answered(AnswerRecord),
    Advanced { index: usize },
    Finished(QuizOutcome),
    Quit,
    /// The intent does not apply in the current state.
    Ignored,
}

/// Holds the active session and the pending option selection, and applies
/// intents to them.
///
/// With no session the controller is in the not-started state.
pub struct QuizController {
    service: QuizLoopService,
    session: Option<QuizSession>,
    selected: Option<usize>,
    last_outcome: Option<QuizOutcome>,
}

impl QuizController {
    #[must_use]
    pub fn new(service: QuizLoopService) -> Self {
        Self {
            service,
            session: None,
            selected: None,
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn service(&self) -> &QuizLoopService {
        &self.service
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Projection of the question on screen, if a session is in progress.
    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        self.session
            .as_ref()
            .and_then(|s| QuestionView::project(s, self.selected))
    }

    /// Projection of the most recent finished session.
    #[must_use]
    pub fn result_view(&self) -> Option<ResultView> {
        self.last_outcome.as_ref().map(ResultView::from_outcome)
    }

    /// Apply `intent` and report what changed.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Storage` if saving a finished session fails. The
    /// session stays complete, so a later `Next` retries the save.
    pub async fn dispatch(&mut self, intent: QuizIntent) -> Result<QuizEvent, QuizError> {
        match intent {
            QuizIntent::Start(category) => {
                let session = self.service.start(category);
                let total = session.total_questions();
                self.session = Some(session);
                self.selected = None;
                self.last_outcome = None;
                if total == 0 {
                    return self.finish().await;
                }
                Ok(QuizEvent::Started { total })
            }
            QuizIntent::Select(index) => {
                let Some(session) = self.session.as_ref() else {
                    return Ok(QuizEvent::Ignored);
                };
                let selectable = session
                    .current_question()
                    .is_some_and(|q| q.has_option(index))
                    && !session.is_current_answered();
                if !selectable {
                    return Ok(QuizEvent::Ignored);
                }
                self.selected = Some(index);
                Ok(QuizEvent::Selected(index))
            }
            QuizIntent::Submit => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(QuizEvent::Ignored);
                };
                Ok(self
                    .service
                    .submit(session, self.selected)
                    .map_or(QuizEvent::Ignored, QuizEvent::Answered))
            }
            QuizIntent::Next => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(QuizEvent::Ignored);
                };
                self.selected = None;
                match self.service.advance(session) {
                    QuizPhase::InProgress { index, .. } => Ok(QuizEvent::Advanced { index }),
                    QuizPhase::Complete => self.finish().await,
                }
            }
            QuizIntent::Retry => {
                let Some(session) = self.session.as_mut() else {
                    return Ok(QuizEvent::Ignored);
                };
                if !session.is_complete() {
                    return Ok(QuizEvent::Ignored);
                }
                self.service.retry(session);
                self.selected = None;
                let total = session.total_questions();
                if total == 0 {
                    return self.finish().await;
                }
                Ok(QuizEvent::Started { total })
            }
            QuizIntent::Quit => {
                if self.session.take().is_none() {
                    return Ok(QuizEvent::Ignored);
                }
                self.selected = None;
                Ok(QuizEvent::Quit)
            }
        }
    }

    async fn finish(&mut self) -> Result<QuizEvent, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoActiveSession)?;
        let outcome = self.service.finish(session).await?;
        self.last_outcome = Some(outcome.clone());
        Ok(QuizEvent::Finished(outcome))
    }
}
