mod config;
mod question;
mod state;

pub use config::{QuizConfig, DEFAULT_TIME_MINUTES};
pub use question::{Answers, Question};
pub use state::{Phase, QuizState};
