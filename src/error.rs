//! Error types for each stage of the upload → play → review flow.

use std::io;

use crate::models::Phase;

/// Message shown for every generation failure; the cause only goes to the log.
pub const GENERATION_FAILED_MESSAGE: &str = "Không thể phân tích tài liệu. Vui lòng thử lại.";

/// Shown inline when the chosen file is not a PDF, Word or text document.
pub const UNSUPPORTED_FILE_MESSAGE: &str =
    "Định dạng file không hỗ trợ. Vui lòng tải lên .pdf, .docx, hoặc .txt";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to read file: {0}")]
    Read(#[from] io::Error),

    #[error("Failed to extract text from Word document: {0}")]
    Extraction(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("API key not found")]
    MissingApiKey,

    #[error("Request to generation service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("No data returned from generation service")]
    EmptyResponse,

    #[error("Generated quiz is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Generated quiz contains no questions")]
    NoQuestions,
}

impl GenerationError {
    /// Stable code used in log records.
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::MissingApiKey => "missing_api_key",
            GenerationError::Request(_) => "request",
            GenerationError::Status { .. } => "status",
            GenerationError::EmptyResponse => "empty_response",
            GenerationError::Parse(_) => "parse",
            GenerationError::NoQuestions => "no_questions",
        }
    }
}

/// Failure of the whole upload job (read, then generate).
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ProcessError {
    /// Text for the blocking alert on the upload screen.
    pub fn user_message(&self) -> String {
        match self {
            ProcessError::Document(DocumentError::UnsupportedFileType(_)) => {
                UNSUPPORTED_FILE_MESSAGE.to_string()
            }
            ProcessError::Document(e) => format!("Lỗi xử lý file: {}", e),
            ProcessError::Generation(_) => {
                format!("Lỗi xử lý file: {}", GENERATION_FAILED_MESSAGE)
            }
        }
    }
}

/// A transition was requested from a phase that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {action} while in {phase:?} phase")]
pub struct TransitionError {
    pub action: &'static str,
    pub phase: Phase,
}

/// Error type for running the terminal app.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
