use thiserror::Error;

use crate::model::Topic;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("total questions must be > 0")]
    InvalidTotalQuestions,

    #[error("time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("passing score must be between 1 and 100")]
    InvalidPassingScore,

    #[error("total questions ({total}) does not match the topic quota sum ({quota_sum})")]
    QuotaMismatch { total: u32, quota_sum: u32 },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Static exam configuration.
///
/// The standard certification exam is 40 questions in 45 minutes with an 80 %
/// passing threshold. Settings are fixed at composition time and never exposed
/// for runtime user configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamSettings {
    total_questions: u32,
    time_limit_secs: u32,
    passing_score_percent: u8,
}

impl ExamSettings {
    /// Creates the standard certification exam settings.
    ///
    /// - 40 questions (the per-topic quota sum)
    /// - 2700 seconds (45 minutes)
    /// - 80 % to pass (32 of 40)
    #[must_use]
    pub fn default_certification() -> Self {
        Self {
            total_questions: 40,
            time_limit_secs: 2700,
            passing_score_percent: 80,
        }
    }

    /// Creates custom exam settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of range, or if
    /// `total_questions` does not match the sum of the per-topic quotas.
    pub fn new(
        total_questions: u32,
        time_limit_secs: u32,
        passing_score_percent: u8,
    ) -> Result<Self, SettingsError> {
        if total_questions == 0 {
            return Err(SettingsError::InvalidTotalQuestions);
        }
        if time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if passing_score_percent == 0 || passing_score_percent > 100 {
            return Err(SettingsError::InvalidPassingScore);
        }
        let quota_sum = Topic::total_quota();
        if total_questions != quota_sum {
            return Err(SettingsError::QuotaMismatch {
                total: total_questions,
                quota_sum,
            });
        }

        Ok(Self {
            total_questions,
            time_limit_secs,
            passing_score_percent,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn passing_score_percent(&self) -> u8 {
        self.passing_score_percent
    }
}

impl Default for ExamSettings {
    fn default() -> Self {
        Self::default_certification()
    }
}
