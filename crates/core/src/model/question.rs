use thiserror::Error;

use crate::model::category::Category;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has empty text")]
    EmptyText { id: QuestionId },

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} has an empty option at index {index}")]
    EmptyOption { id: QuestionId, index: usize },

    #[error("question {id} marks option {index} correct but only has {len} options")]
    AnswerOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// One multiple-choice question from the bank.
///
/// Immutable once built. `correct_answer` always indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category: Category,
    text: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, fewer than two options are
    /// given, any option is blank, or `correct_answer` is out of range.
    pub fn new(
        id: QuestionId,
        category: Category,
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText { id });
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id, index });
        }
        if correct_answer >= options.len() {
            return Err(QuestionError::AnswerOutOfRange {
                id,
                index: correct_answer,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            category,
            text,
            options,
            correct_answer,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn builds_valid_question() {
        let q = Question::new(
            QuestionId::new(1),
            Category::Journal,
            "現金で商品を仕入れた。",
            options(4),
            2,
            "仕入 / 現金",
        )
        .unwrap();

        assert_eq!(q.id(), QuestionId::new(1));
        assert_eq!(q.options().len(), 4);
        assert!(q.is_correct(2));
        assert!(!q.is_correct(0));
        assert!(q.has_option(3));
        assert!(!q.has_option(4));
    }

    #[test]
    fn rejects_blank_text() {
        let err = Question::new(QuestionId::new(1), Category::Term, "  ", options(2), 0, "")
            .unwrap_err();
        assert!(matches!(err, QuestionError::EmptyText { .. }));
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new(QuestionId::new(1), Category::Term, "Q", options(1), 0, "")
            .unwrap_err();
        assert!(matches!(err, QuestionError::TooFewOptions { len: 1, .. }));
    }

    #[test]
    fn rejects_blank_option() {
        let opts = vec!["a".to_string(), " ".to_string()];
        let err =
            Question::new(QuestionId::new(1), Category::Term, "Q", opts, 0, "").unwrap_err();
        assert!(matches!(err, QuestionError::EmptyOption { index: 1, .. }));
    }

    #[test]
    fn rejects_answer_out_of_range() {
        let err = Question::new(QuestionId::new(9), Category::Financial, "Q", options(3), 3, "")
            .unwrap_err();
        assert_eq!(
            err,
            QuestionError::AnswerOutOfRange {
                id: QuestionId::new(9),
                index: 3,
                len: 3
            }
        );
    }
}
