use std::sync::Arc;

use exam_core::model::{ExamSettings, Question, QuizResult};
use exam_core::scoring::Scorer;
use exam_core::Clock;
use storage::repository::{HistoryRepository, SaveOutcome};

use crate::error::QuizError;
use super::plan::QuizPlanBuilder;
use super::session::QuizSession;

/// Result of finishing a quiz: the scored outcome plus what persistence did.
///
/// `result` is always valid; `saved.success == false` means the attempt was
/// scored but could not be persisted (quota or storage failure).
#[derive(Debug, Clone, PartialEq)]
pub struct QuizFinishOutcome {
    pub result: QuizResult,
    pub saved: SaveOutcome,
}

/// Orchestrates quiz start and completion against the history store.
///
/// This is the explicit state container owned by the composition root: it
/// holds the clock and the repository, hands out sessions, and is the only
/// place that writes history. Persistence failures are absorbed here; the
/// in-memory session and result always survive a failed write.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    history: Arc<dyn HistoryRepository>,
    settings: ExamSettings,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            clock,
            history,
            settings: ExamSettings::default_certification(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ExamSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    /// Start a new quiz from the given bank.
    ///
    /// Selection is biased away from recently used question sets; if history
    /// cannot be read, selection proceeds unbiased. The chosen id set is
    /// recorded in history, tolerating write failure. Any previous session
    /// the caller held is simply replaced.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the bank yields no questions.
    pub async fn start_quiz(&self, bank: &[Question]) -> Result<QuizSession, QuizError> {
        let recent_sets = match self.history.load().await {
            Ok(history) => history.used_question_sets,
            Err(err) => {
                tracing::warn!(%err, "history unavailable, selecting without recency bias");
                Vec::new()
            }
        };

        let plan = QuizPlanBuilder::new(bank)
            .with_recent_sets(&recent_sets)
            .build();
        let session = QuizSession::from_plan(plan, self.settings, self.clock.now())?;

        let ids = session.question_ids();
        match self.history.append_used_set(&ids).await {
            Ok(outcome) if !outcome.success => {
                tracing::warn!("used-question set not persisted, selection bias will lag");
            }
            Err(err) => {
                tracing::warn!(%err, "failed to record used-question set");
            }
            Ok(_) => {}
        }

        Ok(session)
    }

    /// Finish the session: score it and append the result to history.
    ///
    /// Returns `None` when the session was already completed (or was never
    /// endable), mirroring [`QuizSession::end`]. The scored result is
    /// returned even when persistence fails; the outcome says what happened.
    pub async fn finish_quiz(&self, session: &mut QuizSession) -> Option<QuizFinishOutcome> {
        let scorer = Scorer::new(self.settings);
        let result = session.end(&scorer, self.clock.now())?;

        let saved = match self.history.append_result(&result).await {
            Ok(outcome) => {
                if !outcome.success {
                    tracing::warn!("quiz result not persisted, keeping in-memory copy");
                }
                outcome
            }
            Err(err) => {
                tracing::warn!(%err, "failed to append quiz result to history");
                SaveOutcome::failed()
            }
        };

        Some(QuizFinishOutcome { result, saved })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
