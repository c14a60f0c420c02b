use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use exam_core::model::{QuestionId, QuizHistory, QuizResult};

/// Errors surfaced by history storage adapters.
///
/// Quota pressure is not an error: it is reported through [`SaveOutcome`] so
/// callers can log and continue with their in-memory state intact.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Structured outcome of a history write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub success: bool,
    pub quota_exceeded: bool,
    pub trimmed: bool,
}

impl SaveOutcome {
    /// Full document written as-is.
    #[must_use]
    pub fn written() -> Self {
        Self {
            success: true,
            quota_exceeded: false,
            trimmed: false,
        }
    }

    /// Document exceeded the quota; a trimmed copy was written instead.
    #[must_use]
    pub fn written_trimmed() -> Self {
        Self {
            success: true,
            quota_exceeded: true,
            trimmed: true,
        }
    }

    /// Even the trimmed copy exceeded the quota; nothing was written.
    #[must_use]
    pub fn rejected() -> Self {
        Self {
            success: false,
            quota_exceeded: true,
            trimmed: true,
        }
    }

    /// Write failed for a non-quota reason a caller chose to absorb.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            quota_exceeded: false,
            trimmed: false,
        }
    }
}

/// What a quota check decided to persist.
pub(crate) enum QuotaCheck {
    Fits { payload: String },
    Trimmed { payload: String, history: QuizHistory },
    Rejected,
}

/// Encodes a history document, retrying once with a trimmed copy when the
/// encoded size exceeds `max_bytes`.
pub(crate) fn encode_within_quota(
    history: &QuizHistory,
    max_bytes: Option<usize>,
) -> Result<QuotaCheck, StorageError> {
    let payload = encode(history)?;
    let Some(limit) = max_bytes else {
        return Ok(QuotaCheck::Fits { payload });
    };
    if payload.len() <= limit {
        return Ok(QuotaCheck::Fits { payload });
    }

    let trimmed = history.trimmed();
    let payload = encode(&trimmed)?;
    if payload.len() <= limit {
        tracing::warn!(
            results = trimmed.results.len(),
            used_sets = trimmed.used_question_sets.len(),
            "history exceeded quota, persisting trimmed copy"
        );
        Ok(QuotaCheck::Trimmed {
            payload,
            history: trimmed,
        })
    } else {
        Ok(QuotaCheck::Rejected)
    }
}

pub(crate) fn encode(history: &QuizHistory) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Repository contract for the single persisted history document.
///
/// `append_result` and `append_used_set` are read-modify-write convenience
/// operations over `load`/`save`; adapters may override them, but the default
/// load-mutate-save sequence is correct for any backend.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Fetch the full history document; an empty document if never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored document cannot be read or parsed.
    async fn load(&self) -> Result<QuizHistory, StorageError>;

    /// Persist the full history document, trimming once under quota pressure.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for non-quota failures; quota conditions
    /// are reported in the returned `SaveOutcome`.
    async fn save(&self, history: &QuizHistory) -> Result<SaveOutcome, StorageError>;

    /// Drop the persisted document entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the document cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;

    /// Append one result to the log.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for read or non-quota write failures.
    async fn append_result(&self, result: &QuizResult) -> Result<SaveOutcome, StorageError> {
        let mut history = self.load().await?;
        history.push_result(result.clone());
        self.save(&history).await
    }

    /// Append one quiz's question-id set to the rolling window.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for read or non-quota write failures.
    async fn append_used_set(&self, ids: &[QuestionId]) -> Result<SaveOutcome, StorageError> {
        let mut history = self.load().await?;
        history.push_used_set(ids.to_vec());
        self.save(&history).await
    }
}

/// In-memory history store for testing and prototyping.
///
/// An optional byte quota (measured against the JSON encoding) exercises the
/// same trim-and-retry path the file-backed store uses.
#[derive(Clone, Default)]
pub struct InMemoryHistoryStore {
    history: Arc<Mutex<QuizHistory>>,
    max_bytes: Option<usize>,
}

impl InMemoryHistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate quota pressure at the given encoded-document size.
    #[must_use]
    pub fn with_quota(mut self, max_bytes: usize) -> Self {
        self.max_bytes = Some(max_bytes);
        self
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryStore {
    async fn load(&self) -> Result<QuizHistory, StorageError> {
        let guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, history: &QuizHistory) -> Result<SaveOutcome, StorageError> {
        let (stored, outcome) = match encode_within_quota(history, self.max_bytes)? {
            QuotaCheck::Fits { .. } => (history.clone(), SaveOutcome::written()),
            QuotaCheck::Trimmed { history, .. } => (history, SaveOutcome::written_trimmed()),
            QuotaCheck::Rejected => return Ok(SaveOutcome::rejected()),
        };

        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = stored;
        Ok(outcome)
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        *guard = QuizHistory::default();
        Ok(())
    }
}
