//! Stateless projections of quiz state for whatever renders it.
//!
//! Nothing here mutates a session; every view is rebuilt from the current
//! state on demand.

use quiz_core::model::{AnswerRecord, QuestionId};

use super::session::{QuizOutcome, QuizSession};

/// Characters of question text kept in result listings.
pub const SNIPPET_CHARS: usize = 50;

/// Feedback shown after a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackView {
    pub is_correct: bool,
    pub selected: usize,
    pub correct_answer: usize,
    pub explanation: String,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub question_id: QuestionId,
    /// One-based question number.
    pub number: usize,
    pub total: usize,
    pub progress_percent: u32,
    pub category_label: &'static str,
    pub text: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub feedback: Option<FeedbackView>,
}

impl QuestionView {
    /// Project the current question of `session`, or `None` once it is complete.
    #[must_use]
    pub fn project(session: &QuizSession, selected: Option<usize>) -> Option<Self> {
        let question = session.current_question()?;
        let progress = session.progress();
        let feedback = session.current_answer().map(|answer| FeedbackView {
            is_correct: answer.is_correct,
            selected: answer.selected,
            correct_answer: answer.correct_answer,
            explanation: question.explanation().to_owned(),
        });

        Some(Self {
            question_id: question.id(),
            number: progress.position + 1,
            total: progress.total,
            progress_percent: progress.percent(),
            category_label: question.category().label(),
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            selected: feedback.as_ref().map(|f| f.selected).or(selected),
            feedback,
        })
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.feedback.is_some()
    }
}

/// One row in the per-question result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerLineView {
    pub number: usize,
    pub is_correct: bool,
    pub snippet: String,
}

impl AnswerLineView {
    fn from_record(index: usize, record: &AnswerRecord) -> Self {
        Self {
            number: index + 1,
            is_correct: record.is_correct,
            snippet: snippet(&record.question_text),
        }
    }
}

/// Summary shown when a session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub percentage: u32,
    pub correct: u32,
    pub total: u32,
    /// Elapsed time as `m:ss`.
    pub elapsed: String,
    pub answers: Vec<AnswerLineView>,
}

impl ResultView {
    #[must_use]
    pub fn from_outcome(outcome: &QuizOutcome) -> Self {
        Self {
            percentage: outcome.percentage(),
            correct: outcome.correct(),
            total: outcome.total(),
            elapsed: outcome.elapsed.to_string(),
            answers: outcome
                .answers
                .iter()
                .enumerate()
                .map(|(i, record)| AnswerLineView::from_record(i, record))
                .collect(),
        }
    }
}

/// First `SNIPPET_CHARS` characters of `text` followed by `...`.
#[must_use]
pub fn snippet(text: &str) -> String {
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Category, CategoryFilter, Question};
    use quiz_core::time::fixed_now;

    fn session() -> QuizSession {
        let questions = (1..=4)
            .map(|id| {
                Question::new(
                    QuestionId::new(id),
                    Category::Financial,
                    format!("Question {id}"),
                    vec!["x".into(), "y".into()],
                    1,
                    format!("Because {id}"),
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(CategoryFilter::All, questions, fixed_now())
    }

    #[test]
    fn projects_unanswered_question() {
        let s = session();
        let view = QuestionView::project(&s, Some(0)).unwrap();

        assert_eq!(view.number, 1);
        assert_eq!(view.total, 4);
        assert_eq!(view.progress_percent, 25);
        assert_eq!(view.category_label, "財務諸表");
        assert_eq!(view.selected, Some(0));
        assert!(!view.is_answered());
    }

    #[test]
    fn answered_question_shows_feedback_with_explanation() {
        let mut s = session();
        s.submit_answer(Some(0));
        let view = QuestionView::project(&s, Some(0)).unwrap();

        let feedback = view.feedback.unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(feedback.correct_answer, 1);
        assert_eq!(feedback.explanation, "Because 1");
    }

    #[test]
    fn complete_session_has_no_question_view() {
        let mut s = session();
        for _ in 0..4 {
            s.advance();
        }
        assert!(QuestionView::project(&s, None).is_none());
    }

    #[test]
    fn result_view_lists_answers() {
        let mut s = session();
        s.submit_answer(Some(1));
        s.advance();
        s.submit_answer(Some(0));
        for _ in 0..3 {
            s.advance();
        }

        let outcome = s.finalize(fixed_now() + Duration::seconds(61)).unwrap();
        let view = ResultView::from_outcome(&outcome);

        assert_eq!(view.percentage, 25);
        assert_eq!(view.correct, 1);
        assert_eq!(view.total, 4);
        assert_eq!(view.elapsed, "1:01");
        assert_eq!(view.answers.len(), 2);
        assert!(view.answers[0].is_correct);
        assert!(!view.answers[1].is_correct);
        assert_eq!(view.answers[1].number, 2);
        assert_eq!(view.answers[1].snippet, "Question 2...");
    }

    #[test]
    fn snippet_counts_characters_not_bytes() {
        let text = "仕".repeat(60);
        let cut = snippet(&text);
        assert_eq!(cut.chars().count(), SNIPPET_CHARS + 3);
        assert!(cut.ends_with("..."));
    }
}
