use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::QuizResult;

/// How many used-question-id sets the history retains.
pub const MAX_USED_SETS: usize = 10;

/// How many of the newest used-question-id sets bias selection away
/// from repeats.
pub const RECENT_SET_WINDOW: usize = 3;

/// Result cap applied when a write must be retried under quota pressure.
pub const TRIMMED_MAX_RESULTS: usize = 20;

/// Used-set cap applied when a write must be retried under quota pressure.
pub const TRIMMED_MAX_SETS: usize = 5;

/// The persisted history document: result log plus the rolling window of
/// recently used question-id sets.
///
/// Grows by append only. The persistence layer may store a `trimmed()` copy
/// when the full document no longer fits its quota.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizHistory {
    pub results: Vec<QuizResult>,
    pub used_question_sets: Vec<Vec<QuestionId>>,
    pub last_quiz_date: Option<DateTime<Utc>>,
}

impl QuizHistory {
    /// Appends a result and advances `last_quiz_date`.
    pub fn push_result(&mut self, result: QuizResult) {
        self.last_quiz_date = Some(result.date);
        self.results.push(result);
    }

    /// Appends one quiz's question-id set, evicting the oldest sets beyond
    /// [`MAX_USED_SETS`].
    pub fn push_used_set(&mut self, ids: Vec<QuestionId>) {
        self.used_question_sets.push(ids);
        if self.used_question_sets.len() > MAX_USED_SETS {
            let excess = self.used_question_sets.len() - MAX_USED_SETS;
            self.used_question_sets.drain(..excess);
        }
    }

    /// Copy with oldest results and sets evicted down to the quota-retry caps.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        let results = self
            .results
            .iter()
            .skip(self.results.len().saturating_sub(TRIMMED_MAX_RESULTS))
            .cloned()
            .collect();
        let used_question_sets = self
            .used_question_sets
            .iter()
            .skip(
                self.used_question_sets
                    .len()
                    .saturating_sub(TRIMMED_MAX_SETS),
            )
            .cloned()
            .collect();

        Self {
            results,
            used_question_sets,
            last_quiz_date: self.last_quiz_date,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.used_question_sets.is_empty()
    }
}
