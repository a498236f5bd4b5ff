mod answer;
mod category;
mod history;
mod ids;
mod question;
mod settings;

pub use ids::{ParseIdError, QuestionId};

pub use answer::AnswerRecord;
pub use category::{Category, CategoryFilter, CategoryParseError, category_label};
pub use history::{HistoryAggregate, HistoryEntry, HistoryEntryError, percentage};
pub use question::{Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
