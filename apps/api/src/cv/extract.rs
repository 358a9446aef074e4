//! Plain-text extraction for uploaded CV files.

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Detects the kind from the declared content type, falling back to the
    /// file extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
            Some("application/pdf") => return Some(Self::Pdf),
            Some("text/plain") => return Some(Self::PlainText),
            _ => {}
        }

        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::PlainText => "text/plain",
        }
    }
}

pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, AppError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}"))),
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::UnprocessableEntity("Text file is not valid UTF-8".to_string())),
    }
}
