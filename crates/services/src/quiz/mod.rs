mod intent;
mod plan;
mod progress;
mod session;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use intent::{QuizController, QuizEvent, QuizIntent};
pub use plan::{QuizBuilder, QuizPlan};
pub use progress::QuizProgress;
pub use session::{QuizOutcome, QuizPhase, QuizSession};
pub use view::{AnswerLineView, FeedbackView, QuestionView, ResultView, SNIPPET_CHARS, snippet};
pub use workflow::QuizLoopService;
