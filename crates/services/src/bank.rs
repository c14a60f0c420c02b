//! Question-bank boundary: parsing, validation, and multi-source merging.
//!
//! Bank files are externally supplied JSON arrays. Records are validated here,
//! once, before they become domain `Question`s; nothing malformed crosses into
//! the selection or scoring code.

use serde::Deserialize;
use std::path::Path;

use exam_core::model::{
    Choice, Difficulty, Question, QuestionError, QuestionId, QuestionType, Topic,
};

use crate::error::BankError;

/// Wire shape of one answer option in a bank file.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceRecord {
    pub label: String,
    pub is_correct: bool,
}

/// Wire shape of one question in a bank file.
///
/// Mirrors the domain `Question` so sources can be deserialized without
/// leaking serde concerns into the domain layer; `into_question` is the
/// validation gate.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub topic: Topic,
    pub choices: Vec<ChoiceRecord>,
    #[serde(default)]
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl QuestionRecord {
    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record violates the question schema
    /// (2–6 choices, at least one correct, non-empty id and text).
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let choices = self
            .choices
            .into_iter()
            .map(|c| Choice::new(c.label, c.is_correct))
            .collect();
        Question::new(
            QuestionId::new(self.id),
            self.text,
            self.question_type,
            self.topic,
            choices,
            self.explanation,
            self.difficulty,
        )
    }
}

/// A source that could not contribute questions to a merged load.
#[derive(Debug)]
pub struct SkippedSource {
    pub source: String,
    pub reason: BankError,
}

/// Outcome of merging several bank sources.
#[derive(Debug)]
pub struct BankLoadReport {
    pub questions: Vec<Question>,
    pub skipped: Vec<SkippedSource>,
}

/// Parses one bank source (a JSON array of question records).
///
/// # Errors
///
/// Returns `BankError::Parse` for invalid JSON and `BankError::Question` for
/// records that violate the question schema.
pub fn parse_source(json: &str) -> Result<Vec<Question>, BankError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(json).map_err(|e| BankError::Parse(e.to_string()))?;
    records
        .into_iter()
        .map(|record| record.into_question().map_err(BankError::from))
        .collect()
}

/// Loads and merges several bank files.
///
/// Per-source failures (unreachable file, malformed JSON, invalid record) are
/// tolerated and reported in the returned `skipped` list, as long as at least
/// one source contributes questions.
///
/// # Errors
///
/// Returns `BankError::NoUsableSource` when no source loads at all.
pub fn load_files<P: AsRef<Path>>(paths: &[P]) -> Result<BankLoadReport, BankError> {
    let mut questions = Vec::new();
    let mut skipped = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let source = path.display().to_string();
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| BankError::Io(e.to_string()))
            .and_then(|raw| parse_source(&raw));
        match loaded {
            Ok(parsed) => questions.extend(parsed),
            Err(reason) => {
                tracing::warn!(%source, %reason, "skipping question source");
                skipped.push(SkippedSource { source, reason });
            }
        }
    }

    if questions.is_empty() {
        return Err(BankError::NoUsableSource);
    }

    Ok(BankLoadReport { questions, skipped })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
