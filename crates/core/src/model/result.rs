use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::ResultId;
use crate::model::{Question, QuizAnswer, Topic};

/// Per-topic slice of a scored quiz.
///
/// Derived at scoring time from the session's questions and answers; never
/// stored independently of its `QuizResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPerformance {
    pub topic: Topic,
    pub correct: u32,
    pub total: u32,
    pub percentage: u8,
}

/// Immutable scored outcome of one completed quiz attempt.
///
/// The `questions`/`answers` snapshot enables detailed review later; results
/// imported from an older history format may lack it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: ResultId,
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u8,
    pub passed: bool,
    pub time_taken_secs: u32,
    pub topic_performance: Vec<TopicPerformance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<QuizAnswer>>,
}

impl QuizResult {
    /// Whether this result carries the snapshot needed for detailed review.
    #[must_use]
    pub fn supports_review(&self) -> bool {
        self.questions.is_some() && self.answers.is_some()
    }
}
