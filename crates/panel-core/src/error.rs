//! Error types for the candidates panel.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Document parse error: {0}")]
    DocumentParse(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// HTTP status code the server answers with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnsupportedFileType(_) => 415,
            Self::TemplateNotFound(_) => 404,
            Self::InvalidRequest(_) | Self::Json(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::DocumentParse(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => 500,
        }
    }

    /// Message safe to hand back to an HTTP client.
    ///
    /// Decoder diagnostics stay in the logs; the client only learns that the
    /// upload could not be processed.
    pub fn public_message(&self) -> String {
        match self {
            Self::UnsupportedFileType(_) => "Unsupported file type".to_string(),
            Self::DocumentParse(_) => "Failed to process file".to_string(),
            Self::Io(_) | Self::Internal(_) | Self::Config(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::UnsupportedFileType("text/plain".into()).status_code(), 415);
        assert_eq!(Error::DocumentParse("bad xref".into()).status_code(), 500);
        assert_eq!(Error::TemplateNotFound("x".into()).status_code(), 404);
        assert_eq!(Error::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(Error::PayloadTooLarge("x".into()).status_code(), 413);
    }

    #[test]
    fn test_parse_error_hides_decoder_message() {
        let err = Error::DocumentParse("invalid xref table at 0x1f".into());
        assert_eq!(err.public_message(), "Failed to process file");
        assert!(err.to_string().contains("invalid xref table"));
    }
}
