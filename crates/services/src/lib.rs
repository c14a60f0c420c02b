#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod history;
pub mod quiz;
pub mod stats;

pub use exam_core::Clock;

pub use error::{BankError, HistoryError, QuizError};
pub use history::HistoryService;
pub use stats::{QuizStatistics, TREND_WINDOW};

pub use quiz::{
    QuizFinishOutcome, QuizLoopService, QuizPlan, QuizPlanBuilder, QuizProgress, QuizSession,
};
