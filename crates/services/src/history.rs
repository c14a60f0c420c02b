use std::sync::Arc;

use exam_core::model::{QuizHistory, QuizResult};
use storage::repository::{HistoryRepository, InMemoryHistoryStore, SaveOutcome};
use storage::transfer::{export_history, import_history};

use crate::error::HistoryError;
use crate::stats::QuizStatistics;

/// History facade that hides the repository from presentation code.
///
/// Reading, exporting, and importing all go through here so the shape
/// validation in `storage::transfer` runs exactly once, at this boundary.
#[derive(Clone)]
pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
}

impl HistoryService {
    #[must_use]
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryHistoryStore::new()))
    }

    /// The full persisted document.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn load(&self) -> Result<QuizHistory, HistoryError> {
        Ok(self.history.load().await?)
    }

    /// Append one result to the log.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` for read or non-quota write failures;
    /// quota conditions come back in the `SaveOutcome`.
    pub async fn add_result(&self, result: &QuizResult) -> Result<SaveOutcome, HistoryError> {
        Ok(self.history.append_result(result).await?)
    }

    /// All results, newest first (results persist in append order).
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn results_newest_first(&self) -> Result<Vec<QuizResult>, HistoryError> {
        let mut results = self.history.load().await?.results;
        results.reverse();
        Ok(results)
    }

    /// Aggregate statistics over the whole result log.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn statistics(&self) -> Result<QuizStatistics, HistoryError> {
        let history = self.history.load().await?;
        Ok(QuizStatistics::from_results(&history.results))
    }

    /// Pretty-printed JSON of the full document, ready for download.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository or encoding failures.
    pub async fn export_json(&self) -> Result<String, HistoryError> {
        let history = self.history.load().await?;
        Ok(export_history(&history)?)
    }

    /// Validate an exported document and replace the stored history with it.
    ///
    /// The store is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Import` for syntactically or structurally
    /// invalid input, `HistoryError::Storage` for repository failures.
    pub async fn import_json(&self, input: &str) -> Result<SaveOutcome, HistoryError> {
        let history = import_history(input)?;
        Ok(self.history.save(&history).await?)
    }

    /// Drop the persisted document.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Storage` on repository failures.
    pub async fn clear(&self) -> Result<(), HistoryError> {
        Ok(self.history.clear().await?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
