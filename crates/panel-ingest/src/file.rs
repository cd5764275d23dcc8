//! Text normalisation for uploaded pro-forma documents.

use std::panic::{self, AssertUnwindSafe};

use panel_core::{Error, Result};
use tracing::{debug, error};

use crate::docx;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Supported upload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
}

impl FileType {
    /// Detect file type from a declared MIME type.
    ///
    /// Parameters (`; charset=...`) and case are ignored.
    pub fn from_mime(mime: &str) -> Result<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_MIME => Ok(Self::Pdf),
            DOCX_MIME => Ok(Self::Docx),
            _ => Err(Error::UnsupportedFileType(mime.to_string())),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::Docx => DOCX_MIME,
        }
    }
}

/// An uploaded file held in memory for the duration of one request.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

/// Extract reading-order plain text from a document.
pub fn normalize(doc: &RawDocument) -> Result<String> {
    let file_type = FileType::from_mime(&doc.content_type)?;

    let text = match file_type {
        FileType::Pdf => extract_pdf(&doc.bytes)?,
        FileType::Docx => docx::extract_text(&doc.bytes)?,
    };

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    debug!("Normalized {} bytes of {:?} into {} chars", doc.bytes.len(), file_type, text.len());
    Ok(text)
}

/// PDF text via pdf-extract, pages separated by newlines.
fn extract_pdf(bytes: &[u8]) -> Result<String> {
    // pdf-extract panics on some malformed inputs instead of returning an error.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text.replace('\u{c}', "\n")),
        Ok(Err(e)) => {
            error!("PDF decoding failed: {}", e);
            Err(Error::DocumentParse(e.to_string()))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("PDF decoder panicked: {}", message);
            Err(Error::DocumentParse(message))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "PDF decoder panicked".to_string()
    }
}
