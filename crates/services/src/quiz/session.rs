use chrono::{DateTime, Utc};
use std::fmt;

use exam_core::model::{AttemptId, ExamSettings, QuestionId, QuizAnswer, QuizResult, ResultId};
use exam_core::scoring::Scorer;
use exam_core::shuffle::{shuffle_choices, ShuffledQuestion};

use crate::error::QuizError;
use super::plan::QuizPlan;
use super::progress::QuizProgress;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One in-memory exam attempt.
///
/// Owns the shuffled question list, the answer slots, the cursor, and the
/// countdown. The session moves through in-progress → (paused ⇄) → completed;
/// once completed it is immutable and `end` yields nothing further.
///
/// Out-of-range navigation and answer indices are deliberate no-ops, and the
/// timer never self-terminates: an external one-second tick drives `tick`,
/// and the caller ends the attempt when the countdown reaches zero. Exactly
/// one session is live at a time; its owner replaces it wholesale on restart.
pub struct QuizSession {
    id: AttemptId,
    settings: ExamSettings,
    questions: Vec<ShuffledQuestion>,
    answers: Vec<QuizAnswer>,
    current: usize,
    time_remaining_secs: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    paused: bool,
}

impl QuizSession {
    /// Create a session over already-shuffled questions.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no questions are provided.
    pub fn new(
        questions: Vec<ShuffledQuestion>,
        settings: ExamSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        let answers = questions
            .iter()
            .map(|q| QuizAnswer::unanswered(q.question().id().clone()))
            .collect();

        Ok(Self {
            id: AttemptId::new_random(),
            time_remaining_secs: settings.time_limit_secs(),
            settings,
            questions,
            answers,
            current: 0,
            started_at,
            completed_at: None,
            paused: false,
        })
    }

    /// Create a session from a selection plan, shuffling each question's
    /// choices once.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the plan is empty.
    pub fn from_plan(
        plan: QuizPlan,
        settings: ExamSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let questions = plan.questions.iter().map(shuffle_choices).collect();
        Self::new(questions, settings, started_at)
    }

    #[must_use]
    pub fn id(&self) -> AttemptId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    #[must_use]
    pub fn questions(&self) -> &[ShuffledQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[QuizAnswer] {
        &self.answers
    }

    /// Ids of this attempt's questions, in session order.
    #[must_use]
    pub fn question_ids(&self) -> Vec<QuestionId> {
        self.questions
            .iter()
            .map(|q| q.question().id().clone())
            .collect()
    }

    /// Total number of questions in this attempt.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions with a recorded answer.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_answered()).count()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.current)
    }

    /// Snapshot of progress for display.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self.answered_count();
        QuizProgress {
            total: self.total_questions(),
            answered,
            remaining: self.total_questions() - answered,
            time_remaining_secs: self.time_remaining_secs,
            is_complete: self.is_completed(),
        }
    }

    /// Record (or change) the answer for the question at `index`.
    ///
    /// `choice_index` refers to the shuffled choice order the user saw.
    /// Completed sessions, unknown question indices, and unknown choice
    /// indices are all no-ops.
    pub fn answer(&mut self, index: usize, choice_index: usize) {
        if self.is_completed() {
            return;
        }
        let Some(question) = self.questions.get(index) else {
            return;
        };
        let Some(choice) = question.choice(choice_index) else {
            return;
        };

        let is_correct = choice.is_correct();
        let elapsed = self.elapsed_secs();
        let slot = &mut self.answers[index];
        slot.selected_choice = Some(choice_index);
        slot.is_correct = is_correct;
        slot.time_taken_secs = elapsed;
    }

    /// Jump to a question, clamped into the valid range.
    pub fn go_to(&mut self, index: usize) {
        if self.questions.is_empty() {
            return;
        }
        self.current = index.min(self.questions.len() - 1);
    }

    /// Advance to the next question; no-op at the end.
    pub fn next(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        }
    }

    /// Step back to the previous question; no-op at the start.
    pub fn prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// One second of exam time elapses. Frozen while paused or completed.
    ///
    /// Returns the remaining seconds; the session does not end itself at
    /// zero, the caller decides when to invoke [`end`](Self::end).
    pub fn tick(&mut self) -> u32 {
        if !self.paused && !self.is_completed() {
            self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
        }
        self.time_remaining_secs
    }

    /// Freeze the countdown.
    pub fn pause(&mut self) {
        if !self.is_completed() {
            self.paused = true;
        }
    }

    /// Resume a paused attempt.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Finish the attempt and score it.
    ///
    /// Allowed from in-progress or paused; an already-completed session
    /// yields `None` rather than a second result.
    pub fn end(&mut self, scorer: &Scorer, completed_at: DateTime<Utc>) -> Option<QuizResult> {
        if self.is_completed() {
            return None;
        }

        self.completed_at = Some(completed_at);
        self.paused = false;

        Some(scorer.score(
            ResultId::new_random(),
            completed_at,
            &self.questions,
            &self.answers,
            self.time_remaining_secs,
        ))
    }

    fn elapsed_secs(&self) -> u32 {
        self.settings
            .time_limit_secs()
            .saturating_sub(self.time_remaining_secs)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answered_count())
            .field("time_remaining_secs", &self.time_remaining_secs)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
