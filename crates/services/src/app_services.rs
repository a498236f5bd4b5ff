use std::sync::Arc;

use quiz_core::model::{Question, QuizSettings};
use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::history_service::HistoryService;
use crate::quiz::{QuizController, QuizLoopService};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    settings: QuizSettings,
    quiz_loop: QuizLoopService,
    history: Arc<HistoryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        bank: Vec<Question>,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let history_limit = usize::try_from(settings.history_limit()).unwrap_or(usize::MAX);
        let storage = Storage::sqlite(db_url, history_limit).await?;
        Ok(Self::from_storage(&storage, clock, bank, settings))
    }

    /// Build services over volatile in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock, bank: Vec<Question>, settings: QuizSettings) -> Self {
        let history_limit = usize::try_from(settings.history_limit()).unwrap_or(usize::MAX);
        let storage = Storage::in_memory_with_limit(history_limit);
        Self::from_storage(&storage, clock, bank, settings)
    }

    #[must_use]
    pub fn from_storage(
        storage: &Storage,
        clock: Clock,
        bank: Vec<Question>,
        settings: QuizSettings,
    ) -> Self {
        let quiz_loop = QuizLoopService::new(clock, bank, Arc::clone(&storage.history))
            .with_settings(settings);
        let recent_len = usize::try_from(settings.recent_history_len()).unwrap_or(usize::MAX);
        let history = Arc::new(
            HistoryService::new(Arc::clone(&storage.history)).with_recent_len(recent_len),
        );

        tracing::debug!(
            questions = quiz_loop.bank().len(),
            sample_size = settings.sample_size(),
            history_limit = settings.history_limit(),
            "app services ready"
        );

        Self {
            settings,
            quiz_loop,
            history,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn quiz_loop(&self) -> &QuizLoopService {
        &self.quiz_loop
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    /// A fresh controller in the not-started state.
    #[must_use]
    pub fn controller(&self) -> QuizController {
        QuizController::new(self.quiz_loop.clone())
    }
}
