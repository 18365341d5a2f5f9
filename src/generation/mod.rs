//! Quiz generation through a hosted model.

mod client;
mod prompt;

use async_trait::async_trait;

use crate::document::DocumentPayload;
use crate::error::GenerationError;
use crate::models::Question;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, parse_questions};
pub use prompt::{SYSTEM_INSTRUCTION, TEMPERATURE, USER_PROMPT, response_schema};

/// Produces a question list from a normalized document.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, payload: &DocumentPayload) -> Result<Vec<Question>, GenerationError>;
}
