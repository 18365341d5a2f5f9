use crate::models::{Answers, Question};
use crate::scoring::ScoreReport;

/// Lifecycle phase, one per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Upload,
    Config,
    Playing,
    Result,
}

/// Everything the app knows about the current document and play-through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizState {
    pub phase: Phase,
    /// Replaced wholesale on each upload; reordered only when a play-through starts.
    pub questions: Vec<Question>,
    pub answers: Answers,
    /// Countdown seconds left while playing with a timer.
    pub time_remaining: Option<u64>,
    /// Seconds spent on the last submitted play-through.
    pub time_used: u64,
    /// Filled in when a play-through is submitted.
    pub score: Option<ScoreReport>,
    pub file_name: Option<String>,
}
