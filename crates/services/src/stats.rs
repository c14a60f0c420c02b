//! Pure aggregation over the result log. Everything here is a total function:
//! an empty log produces zeroed statistics, never an error.

use exam_core::model::{QuizResult, Topic, TopicPerformance};
use exam_core::scoring::percentage_of;

/// How many of the newest results feed the trend series.
pub const TREND_WINDOW: usize = 10;

/// Summary metrics derived from the whole result log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizStatistics {
    pub total_quizzes: usize,
    pub average_percentage: f64,
    pub pass_rate_percent: f64,
    pub best_percentage: u8,
    pub worst_percentage: u8,
    pub average_time_secs: f64,
    /// Percentages of the newest [`TREND_WINDOW`] results, oldest first.
    pub recent_trend: Vec<u8>,
    /// Lifetime per-topic totals summed across all results' breakdowns.
    pub topic_totals: Vec<TopicPerformance>,
}

impl QuizStatistics {
    /// Aggregate a result log given in chronological (append) order.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_results(results: &[QuizResult]) -> Self {
        if results.is_empty() {
            return Self::default();
        }

        let count = results.len() as f64;
        let percentage_sum: u32 = results.iter().map(|r| u32::from(r.percentage)).sum();
        let passed = results.iter().filter(|r| r.passed).count();
        let time_sum: u64 = results.iter().map(|r| u64::from(r.time_taken_secs)).sum();

        let recent_trend = results
            .iter()
            .skip(results.len().saturating_sub(TREND_WINDOW))
            .map(|r| r.percentage)
            .collect();

        Self {
            total_quizzes: results.len(),
            average_percentage: f64::from(percentage_sum) / count,
            pass_rate_percent: (passed as f64) * 100.0 / count,
            best_percentage: results.iter().map(|r| r.percentage).max().unwrap_or(0),
            worst_percentage: results.iter().map(|r| r.percentage).min().unwrap_or(0),
            average_time_secs: (time_sum as f64) / count,
            recent_trend,
            topic_totals: lifetime_topic_totals(results),
        }
    }
}

fn lifetime_topic_totals(results: &[QuizResult]) -> Vec<TopicPerformance> {
    Topic::ALL
        .into_iter()
        .filter_map(|topic| {
            let mut correct = 0_u32;
            let mut total = 0_u32;
            for entry in results
                .iter()
                .flat_map(|r| &r.topic_performance)
                .filter(|p| p.topic == topic)
            {
                correct += entry.correct;
                total += entry.total;
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
