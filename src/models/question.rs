use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Selected option text keyed by question id.
pub type Answers = HashMap<String, String>;

/// A multiple-choice question as returned by the generation service.
///
/// `correct_answer` holds the literal text of the right option, not an index,
/// so reordering `options` never changes which option is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_correct(&self, answer: Option<&str>) -> bool {
        answer == Some(self.correct_answer.as_str())
    }

    /// Index of the option matching `correct_answer`, if the model returned a consistent question.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }
}
