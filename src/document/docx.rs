//! Raw text extraction from Word (OOXML) documents.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Pulls the plain text out of a `.docx` file.
///
/// Paragraphs are separated by a blank line; tabs and line breaks inside
/// a paragraph are kept.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| DocumentError::Extraction(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| DocumentError::Extraction(e.to_string()))?
        .read_to_string(&mut xml)?;

    text_from_document_xml(&xml)
}

fn text_from_document_xml(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocumentError::Extraction(e.to_string()))?;

        match event {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_run_text => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| DocumentError::Extraction(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}
