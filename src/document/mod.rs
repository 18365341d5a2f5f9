//! Turns an uploaded file into the payload the generation service accepts.
//!
//! Plain text and Word documents both end up as base64 `text/plain`; PDFs are
//! passed through untouched so the model can read them directly.

mod docx;

use std::path::{Path, PathBuf};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use tracing::{debug, info};

use crate::error::DocumentError;

pub use docx::extract_text as extract_docx_text;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The document kinds the app knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Picks the reader from the MIME type, falling back to the `.docx` suffix
    /// for Word files whose type is missing or wrong.
    pub fn detect(mime_type: Option<&str>, file_name: &str) -> Result<Self, DocumentError> {
        match mime_type {
            Some(MIME_TEXT) => Ok(Self::Text),
            Some(MIME_PDF) => Ok(Self::Pdf),
            Some(MIME_DOCX) => Ok(Self::Docx),
            _ if file_name.to_lowercase().ends_with(".docx") => Ok(Self::Docx),
            other => Err(DocumentError::UnsupportedFileType(
                other.unwrap_or(file_name).to_string(),
            )),
        }
    }
}

/// Normalized input for the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    pub mime_type: String,
    /// Base64 (standard alphabet, padded).
    pub data: String,
}

impl DocumentPayload {
    pub fn from_text(text: &str) -> Self {
        Self {
            mime_type: MIME_TEXT.to_string(),
            data: BASE64.encode(text.as_bytes()),
        }
    }

    pub fn from_pdf(bytes: &[u8]) -> Self {
        Self {
            mime_type: MIME_PDF.to_string(),
            data: BASE64.encode(bytes),
        }
    }
}

/// A file picked on the upload screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: Option<String>,
}

impl SourceFile {
    /// Describes a file on disk, guessing its MIME type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime_type = mime_for_path(&path).map(str::to_string);

        Self {
            path,
            name,
            mime_type,
        }
    }

    pub fn kind(&self) -> Result<DocumentKind, DocumentError> {
        DocumentKind::detect(self.mime_type.as_deref(), &self.name)
    }
}

/// MIME type for the extensions the app accepts.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
        "txt" => Some(MIME_TEXT),
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        _ => None,
    }
}

/// Reads `file` and converts it into a [`DocumentPayload`].
///
/// The type check happens before any I/O.
pub async fn read_document(file: &SourceFile) -> Result<DocumentPayload, DocumentError> {
    let kind = file.kind()?;
    debug!(file = %file.name, kind = ?kind, "Reading document");

    let bytes = tokio::fs::read(&file.path).await?;
    let payload = encode_document(kind, &bytes)?;

    info!(
        file = %file.name,
        mime_type = %payload.mime_type,
        size_bytes = bytes.len(),
        "Document read"
    );
    Ok(payload)
}

/// Converts raw file bytes of a known kind into a payload.
pub fn encode_document(kind: DocumentKind, bytes: &[u8]) -> Result<DocumentPayload, DocumentError> {
    match kind {
        DocumentKind::Text => Ok(DocumentPayload::from_text(&String::from_utf8_lossy(bytes))),
        DocumentKind::Docx => Ok(DocumentPayload::from_text(&docx::extract_text(bytes)?)),
        DocumentKind::Pdf => Ok(DocumentPayload::from_pdf(bytes)),
    }
}
