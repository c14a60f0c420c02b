use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

pub const MIN_CHOICES: usize = 2;
pub const MAX_CHOICES: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least {MIN_CHOICES} choices, got {count}")]
    TooFewChoices { count: usize },

    #[error("question allows at most {MAX_CHOICES} choices, got {count}")]
    TooManyChoices { count: usize },

    #[error("question has no correct choice")]
    NoCorrectChoice,
}

//
// ─── QUESTION TYPE & DIFFICULTY ────────────────────────────────────────────────
//

/// Fact-recall vs. applied-scenario questions.
///
/// Two topics require a fixed share of situational questions per quiz; the
/// selector treats the two types as independent sub-pools for those topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Knowledge,
    Situational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

//
// ─── CHOICE ────────────────────────────────────────────────────────────────────
//

/// One answer option. Immutable once loaded from the bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    label: String,
    is_correct: bool,
}

impl Choice {
    #[must_use]
    pub fn new(label: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One exam question as supplied by the question bank.
///
/// Questions are validated once at the bank boundary and never mutated
/// afterwards; the quiz works on per-session shuffled copies of the choices,
/// leaving the original order intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    question_type: QuestionType,
    topic: Topic,
    choices: Vec<Choice>,
    explanation: String,
    difficulty: Difficulty,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or text is empty, the choice count is
    /// outside 2–6, or no choice is marked correct.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        question_type: QuestionType,
        topic: Topic,
        choices: Vec<Choice>,
        explanation: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if id.as_str().trim().is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if choices.len() < MIN_CHOICES {
            return Err(QuestionError::TooFewChoices {
                count: choices.len(),
            });
        }
        if choices.len() > MAX_CHOICES {
            return Err(QuestionError::TooManyChoices {
                count: choices.len(),
            });
        }
        if !choices.iter().any(Choice::is_correct) {
            return Err(QuestionError::NoCorrectChoice);
        }

        Ok(Self {
            id,
            text,
            question_type,
            topic,
            choices,
            explanation: explanation.into(),
            difficulty,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn topic(&self) -> Topic {
        self.topic
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn is_situational(&self) -> bool {
        self.question_type == QuestionType::Situational
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
