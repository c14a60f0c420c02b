mod answer;
mod history;
mod ids;
mod question;
mod result;
mod settings;
mod topic;

pub use answer::QuizAnswer;
pub use history::{
    QuizHistory, MAX_USED_SETS, RECENT_SET_WINDOW, TRIMMED_MAX_RESULTS, TRIMMED_MAX_SETS,
};
pub use ids::{AttemptId, QuestionId, ResultId};
pub use question::{
    Choice, Difficulty, Question, QuestionError, QuestionType, MAX_CHOICES, MIN_CHOICES,
};
pub use result::{QuizResult, TopicPerformance};
pub use settings::{ExamSettings, SettingsError};
pub use topic::Topic;
