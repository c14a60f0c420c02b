use thiserror::Error;

use exam_core::model::QuizHistory;

use crate::repository::StorageError;

/// Import failures, split so callers can tell un-retryable malformed input
/// apart from merely mis-shaped documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// The input is not JSON at all.
    #[error("invalid JSON: {0}")]
    Syntax(String),

    /// The input is valid JSON but does not have the history document shape.
    #[error("unexpected history shape: {0}")]
    Structure(String),
}

/// Pretty-printed export of the full history document, suitable for download.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn export_history(history: &QuizHistory) -> Result<String, StorageError> {
    serde_json::to_string_pretty(history).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Validates and decodes an exported history document.
///
/// Runs as one explicit validator pass at the persistence boundary: the shape
/// is checked here, once, and trusted downstream. Parsing happens in two
/// stages so syntactic and structural failures stay distinguishable.
///
/// # Errors
///
/// Returns `ImportError::Syntax` for invalid JSON and
/// `ImportError::Structure` for valid JSON of the wrong shape.
pub fn import_history(input: &str) -> Result<QuizHistory, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|e| ImportError::Syntax(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| ImportError::Structure(e.to_string()))
}
