use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Record of a single submitted answer.
///
/// Snapshots the question text so results can be listed after the session
/// itself is gone. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub question_text: String,
    pub selected: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Grade `selected` against `question`.
    #[must_use]
    pub fn grade(question: &Question, selected: usize) -> Self {
        Self {
            question_id: question.id(),
            question_text: question.text().to_owned(),
            selected,
            correct_answer: question.correct_answer(),
            is_correct: question.is_correct(selected),
        }
    }
}
