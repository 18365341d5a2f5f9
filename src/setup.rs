//! Draft preferences edited on the setup screen.

use crate::models::{DEFAULT_TIME_MINUTES, QuizConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    ShuffleQuestions,
    ShuffleOptions,
    EnableTimer,
    TimeMinutes,
}

#[derive(Debug, Clone)]
pub struct SetupForm {
    draft: QuizConfig,
    minutes_input: String,
    field: SetupField,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            draft: QuizConfig::default(),
            minutes_input: DEFAULT_TIME_MINUTES.to_string(),
            field: SetupField::ShuffleQuestions,
        }
    }
}

/// Parses the minutes field; empty or invalid input becomes 1, and so does 0.
pub fn parse_minutes(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(1).max(1)
}

impl SetupForm {
    pub fn field(&self) -> SetupField {
        self.field
    }

    pub fn draft(&self) -> &QuizConfig {
        &self.draft
    }

    pub fn minutes_input(&self) -> &str {
        &self.minutes_input
    }

    /// The config emitted when the user starts the quiz.
    pub fn config(&self) -> QuizConfig {
        QuizConfig {
            time_minutes: parse_minutes(&self.minutes_input),
            ..self.draft
        }
    }

    fn fields(&self) -> &'static [SetupField] {
        if self.draft.enable_timer {
            &[
                SetupField::ShuffleQuestions,
                SetupField::ShuffleOptions,
                SetupField::EnableTimer,
                SetupField::TimeMinutes,
            ]
        } else {
            &[
                SetupField::ShuffleQuestions,
                SetupField::ShuffleOptions,
                SetupField::EnableTimer,
            ]
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(index + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = fields[(index + fields.len() - 1) % fields.len()];
    }

    /// Flips the boolean under the cursor.
    pub fn toggle(&mut self) {
        match self.field {
            SetupField::ShuffleQuestions => {
                self.draft.shuffle_questions = !self.draft.shuffle_questions
            }
            SetupField::ShuffleOptions => self.draft.shuffle_options = !self.draft.shuffle_options,
            SetupField::EnableTimer => self.draft.enable_timer = !self.draft.enable_timer,
            SetupField::TimeMinutes => {}
        }
    }

    pub fn push_digit(&mut self, c: char) {
        if self.field == SetupField::TimeMinutes && c.is_ascii_digit() && self.minutes_input.len() < 4 {
            self.minutes_input.push(c);
        }
    }

    pub fn pop_digit(&mut self) {
        if self.field == SetupField::TimeMinutes {
            self.minutes_input.pop();
        }
    }

    pub fn increment_minutes(&mut self) {
        let minutes = parse_minutes(&self.minutes_input).saturating_add(1);
        self.minutes_input = minutes.to_string();
    }

    pub fn decrement_minutes(&mut self) {
        let minutes = parse_minutes(&self.minutes_input).saturating_sub(1).max(1);
        self.minutes_input = minutes.to_string();
    }
}
