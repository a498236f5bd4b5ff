#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod history_service;
pub mod quiz;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizError};
pub use history_service::{HistoryListItem, HistoryOverview, HistoryService};

pub use quiz::{
    QuizController, QuizEvent, QuizIntent, QuizLoopService, QuizOutcome, QuizPhase, QuizSession,
};
