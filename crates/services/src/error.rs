//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{HistoryEntryError, SettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no quiz in progress")]
    NoActiveSession,
    #[error("quiz still has unanswered questions")]
    NotComplete,
    #[error(transparent)]
    History(#[from] HistoryEntryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
