//! A single play-through: navigation, recorded answers and the countdown.

use std::time::Duration;

use tracing::debug;

use crate::models::{Answers, Question};

/// Interval between clock ticks while playing.
pub const TICK: Duration = Duration::from_secs(1);

/// Hand-off from the player to the state machine when the quiz ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub answers: Answers,
    pub time_used: u64,
}

#[derive(Debug, Clone)]
pub struct Player {
    questions: Vec<Question>,
    current: usize,
    highlighted: usize,
    answers: Answers,
    /// `None` when no time limit is configured.
    time_left: Option<u64>,
    time_used: u64,
    /// Cursor of the question grid while it is open.
    grid: Option<usize>,
    submitted: bool,
}

impl Player {
    pub fn new(questions: Vec<Question>, time_limit_secs: Option<u64>) -> Self {
        Self {
            questions,
            current: 0,
            highlighted: 0,
            answers: Answers::new(),
            time_left: time_limit_secs,
            time_used: 0,
            grid: None,
            submitted: false,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn highlighted_option(&self) -> usize {
        self.highlighted
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn time_left(&self) -> Option<u64> {
        self.time_left
    }

    pub fn time_used(&self) -> u64 {
        self.time_used
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.options.len())
    }

    pub fn highlight_next(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Records option `index` of the current question as the answer.
    pub fn select(&mut self, index: usize) -> bool {
        if self.submitted {
            return false;
        }
        let Some(question) = self.questions.get(self.current) else {
            return false;
        };
        let Some(option) = question.options.get(index) else {
            return false;
        };

        self.answers.insert(question.id.clone(), option.clone());
        self.highlighted = index;
        true
    }

    pub fn select_highlighted(&mut self) -> bool {
        self.select(self.highlighted)
    }

    /// Answer recorded for the question at `index`.
    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        let question = self.questions.get(index)?;
        self.answers.get(&question.id).map(String::as_str)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.selected_answer(index).is_some()
    }

    pub fn answered_count(&self) -> usize {
        (0..self.questions.len())
            .filter(|&i| self.is_answered(i))
            .count()
    }

    pub fn progress_percent(&self) -> u16 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.answered_count() * 100 / self.questions.len()) as u16
    }

    pub fn next(&mut self) {
        if !self.is_last() {
            self.jump(self.current + 1);
        }
    }

    pub fn previous(&mut self) {
        if !self.is_first() {
            self.jump(self.current - 1);
        }
    }

    /// Moves to question `index`; out-of-range indices are ignored.
    pub fn jump(&mut self, index: usize) {
        if index >= self.questions.len() {
            return;
        }
        self.current = index;
        self.highlighted = self
            .selected_answer(index)
            .and_then(|answer| self.questions[index].options.iter().position(|o| o == answer))
            .unwrap_or(0);
    }

    pub fn grid_cursor(&self) -> Option<usize> {
        self.grid
    }

    pub fn toggle_grid(&mut self) {
        self.grid = match self.grid {
            Some(_) => None,
            None => Some(self.current),
        };
    }

    /// Moves the grid cursor by `delta` cells, clamped to the question range.
    pub fn move_grid(&mut self, delta: isize) {
        if let Some(cursor) = self.grid {
            let last = self.questions.len().saturating_sub(1);
            self.grid = Some(cursor.saturating_add_signed(delta).min(last));
        }
    }

    /// Jumps to the question under the grid cursor and closes the grid.
    pub fn jump_to_grid_cursor(&mut self) {
        if let Some(cursor) = self.grid.take() {
            self.jump(cursor);
        }
    }

    /// Advances the clock by one second.
    ///
    /// Returns the submission when the countdown runs out. Once the player
    /// has submitted, the clock is stopped and this always returns `None`.
    pub fn tick(&mut self) -> Option<Submission> {
        if self.submitted {
            return None;
        }

        self.time_used += 1;
        match self.time_left {
            Some(left) if left <= 1 => {
                self.time_left = Some(0);
                debug!(time_used = self.time_used, "Countdown expired");
                self.submit()
            }
            Some(left) => {
                self.time_left = Some(left - 1);
                None
            }
            None => None,
        }
    }

    /// Ends the play-through. Only the first call yields a submission.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.submitted {
            return None;
        }
        self.submitted = true;
        self.grid = None;

        Some(Submission {
            answers: self.answers.clone(),
            time_used: self.time_used,
        })
    }
}
