use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Per-question answer slot for one quiz attempt.
///
/// One slot exists per question, in session order, created unanswered at quiz
/// start. The slot is mutated in place as the user answers and re-answers;
/// `selected_choice` indexes into the session's shuffled choice order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub question_id: QuestionId,
    pub selected_choice: Option<usize>,
    pub is_correct: bool,
    pub time_taken_secs: u32,
}

impl QuizAnswer {
    /// Fresh unanswered slot for the given question.
    #[must_use]
    pub fn unanswered(question_id: QuestionId) -> Self {
        Self {
            question_id,
            selected_choice: None,
            is_correct: false,
            time_taken_secs: 0,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected_choice.is_some()
    }
}
