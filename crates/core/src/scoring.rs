use chrono::{DateTime, Utc};

use crate::model::{
    ExamSettings, QuizAnswer, QuizResult, ResultId, Topic, TopicPerformance,
};
use crate::shuffle::ShuffledQuestion;

/// Rounded percentage of `correct` out of `total`, with 0 on an empty total.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn percentage_of(correct: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((f64::from(correct) * 100.0) / f64::from(total)).round() as u8
}

/// Turns a finished attempt's raw answers into an immutable `QuizResult`.
///
/// Scoring is a pure computation over the session's questions and answers;
/// the per-topic breakdown is recomputed here and never stored separately.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    settings: ExamSettings,
}

impl Scorer {
    #[must_use]
    pub fn new(settings: ExamSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub fn settings(&self) -> &ExamSettings {
        &self.settings
    }

    /// Scores one completed attempt.
    ///
    /// - `time_taken = time_limit − time_remaining`
    /// - `percentage = round(100 · correct / answered_total)`, 0 for an empty
    ///   question list
    /// - `passed = percentage ≥ passing threshold`
    /// - topics with no questions in this session are omitted from the
    ///   breakdown rather than reported as zero rows
    ///
    /// The full question/answer snapshot is embedded so the result can be
    /// reviewed in detail later.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn score(
        &self,
        id: ResultId,
        completed_at: DateTime<Utc>,
        questions: &[ShuffledQuestion],
        answers: &[QuizAnswer],
        time_remaining_secs: u32,
    ) -> QuizResult {
        let total_questions = questions.len() as u32;
        let score = answers.iter().filter(|a| a.is_correct).count() as u32;
        let percentage = percentage_of(score, total_questions);
        let passed = percentage >= self.settings.passing_score_percent();
        let time_taken_secs = self
            .settings
            .time_limit_secs()
            .saturating_sub(time_remaining_secs);

        QuizResult {
            id,
            date: completed_at,
            score,
            total_questions,
            percentage,
            passed,
            time_taken_secs,
            topic_performance: topic_breakdown(questions, answers),
            questions: Some(questions.iter().map(|q| q.question().clone()).collect()),
            answers: Some(answers.to_vec()),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn topic_breakdown(questions: &[ShuffledQuestion], answers: &[QuizAnswer]) -> Vec<TopicPerformance> {
    Topic::ALL
        .into_iter()
        .filter_map(|topic| {
            let mut correct = 0_u32;
            let mut total = 0_u32;
            for (question, answer) in questions.iter().zip(answers) {
                if question.question().topic() != topic {
                    continue;
                }
                total += 1;
                if answer.is_correct {
                    correct += 1;
                }
            }
            (total > 0).then(|| TopicPerformance {
                topic,
                correct,
                total,
                percentage: percentage_of(correct, total),
            })
        })
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
