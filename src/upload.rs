//! Upload screen state and the background job that turns a file into questions.

use tracing::{debug, warn};

use crate::document::{SourceFile, read_document};
use crate::error::{DocumentError, ProcessError, UNSUPPORTED_FILE_MESSAGE};
use crate::generation::QuizGenerator;
use crate::models::Question;

/// Result of an upload job, sent back to the event loop.
#[derive(Debug)]
pub struct UploadOutcome {
    pub file_name: String,
    pub result: Result<Vec<Question>, ProcessError>,
}

/// Reads `file` and asks `generator` for a quiz. Either step failing fails the job.
pub async fn process_file(
    file: &SourceFile,
    generator: &dyn QuizGenerator,
) -> Result<Vec<Question>, ProcessError> {
    let payload = read_document(file).await?;
    let questions = generator.generate(&payload).await?;
    Ok(questions)
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    input: String,
    /// Inline validation message under the input.
    error: Option<String>,
    /// Blocking message that must be dismissed.
    alert: Option<String>,
    loading: bool,
}

impl UploadForm {
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            input: path.into(),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn push(&mut self, c: char) {
        self.error = None;
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.error = None;
        self.input.pop();
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Validates the typed path and, if acceptable, marks the form as loading.
    ///
    /// Unsupported types are rejected here, before anything is read.
    pub fn prepare(&mut self) -> Option<SourceFile> {
        if self.loading {
            return None;
        }

        let path = self.input.trim();
        if path.is_empty() {
            return None;
        }

        let file = SourceFile::from_path(path);
        match file.kind() {
            Ok(kind) => {
                debug!(file = %file.name, kind = ?kind, "Upload accepted");
                self.error = None;
                self.loading = true;
                Some(file)
            }
            Err(DocumentError::UnsupportedFileType(mime)) => {
                warn!(file = %file.name, mime = %mime, "Rejected unsupported file type");
                self.error = Some(UNSUPPORTED_FILE_MESSAGE.to_string());
                None
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Clears the loading flag and shows `error` as a blocking alert.
    pub fn fail(&mut self, error: &ProcessError) {
        self.loading = false;
        self.alert = Some(error.user_message());
    }
}
