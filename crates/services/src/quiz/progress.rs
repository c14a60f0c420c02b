/// Aggregated view of one attempt's progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub time_remaining_secs: u32,
    pub is_complete: bool,
}
