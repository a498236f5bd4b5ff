use quiz_core::model::{Category, Question, QuestionId};
use serde::Deserialize;
use std::path::Path;

use crate::repository::StorageError;

/// Persisted shape of a question bank entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: u64,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// Validate the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if the category is unknown or the question is invalid.
    pub fn into_question(self) -> Result<Question, quiz_core::Error> {
        let category: Category = self.category.parse()?;
        Ok(Question::new(
            QuestionId::new(self.id),
            category,
            self.question,
            self.options,
            self.correct_answer,
            self.explanation,
        )?)
    }
}

/// Parse a JSON array of question records.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON or the first
/// invalid record.
pub fn parse_question_bank(raw: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;

    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            record.into_question().map_err(|e| {
                StorageError::Serialization(format!("question bank entry {position}: {e}"))
            })
        })
        .collect()
}

/// Read and parse a question bank file.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, or
/// `StorageError::Serialization` if its contents are invalid.
pub fn read_question_bank(path: impl AsRef<Path>) -> Result<Vec<Question>, StorageError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let questions = parse_question_bank(&raw)?;
    tracing::info!(path = %path.display(), count = questions.len(), "question bank loaded");
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = r#"[
        {"id": 1, "category": "journal", "question": "Q1", "options": ["a", "b"], "correctAnswer": 1, "explanation": "because"},
        {"id": 2, "category": "term", "question": "Q2", "options": ["a", "b", "c"], "correctAnswer": 0}
    ]"#;

    #[test]
    fn parses_records_into_questions() {
        let bank = parse_question_bank(BANK).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank[0].category(), Category::Journal);
        assert_eq!(bank[0].explanation(), "because");
        assert_eq!(bank[1].explanation(), "");
        assert_eq!(bank[1].options().len(), 3);
    }

    #[test]
    fn unknown_category_names_the_entry() {
        let raw = r#"[{"id": 1, "category": "tax", "question": "Q", "options": ["a", "b"], "correctAnswer": 0}]"#;
        let err = parse_question_bank(raw).unwrap_err();
        let StorageError::Serialization(msg) = err else {
            panic!("expected serialization error");
        };
        assert!(msg.contains("entry 0"));
        assert!(msg.contains("tax"));
    }

    #[test]
    fn answer_out_of_range_is_rejected() {
        let raw = r#"[{"id": 5, "category": "financial", "question": "Q", "options": ["a", "b"], "correctAnswer": 2}]"#;
        assert!(matches!(
            parse_question_bank(raw),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_question_bank("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
