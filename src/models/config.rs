/// Default countdown length offered by the setup screen.
pub const DEFAULT_TIME_MINUTES: u32 = 15;

/// Preferences chosen on the setup screen before a play-through starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfig {
    pub shuffle_questions: bool,
    pub shuffle_options: bool,
    pub enable_timer: bool,
    /// Only used when `enable_timer` is set.
    pub time_minutes: u32,
}

impl QuizConfig {
    /// Countdown length in seconds, or `None` when the timer is off.
    pub fn time_limit_secs(&self) -> Option<u64> {
        self.enable_timer
            .then(|| u64::from(self.time_minutes.max(1)) * 60)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            shuffle_questions: true,
            shuffle_options: true,
            enable_timer: false,
            time_minutes: DEFAULT_TIME_MINUTES,
        }
    }
}
