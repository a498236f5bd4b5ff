use thiserror::Error;

use crate::model::{CategoryParseError, HistoryEntryError, QuestionError, SettingsError};

/// Any domain validation failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryParseError),
    #[error(transparent)]
    History(#[from] HistoryEntryError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
