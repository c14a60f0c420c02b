//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{QuestionError, SettingsError};
use storage::repository::StorageError;
use storage::transfer::ImportError;

/// Errors emitted while loading and validating the question bank.
///
/// Transport failures (`Io`) and malformed data (`Parse`, `Question`) are kept
/// distinct: a transport failure may be retried, malformed data may not.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("no question source could be loaded")]
    NoUsableSource,

    #[error("unreadable question source: {0}")]
    Io(String),

    #[error("malformed question source: {0}")]
    Parse(String),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for a quiz")]
    Empty,

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the history service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Import(#[from] ImportError),
}
