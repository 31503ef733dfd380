//! Document extraction: turns an uploaded resume into plain query text.
//!
//! PDFs are concatenated page by page, plain text is decoded as UTF-8
//! verbatim. Nothing here knows about HTTP or rendering; callers decide how an
//! `ExtractionError` is shown.

pub mod pdf;

use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::models::document::{DocumentKind, ExtractedDocument};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}': upload a .txt or .pdf file")]
    UnsupportedContentType(String),

    #[error("The uploaded file is empty")]
    Empty,

    #[error("Text file is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Could not read PDF: {0}")]
    InvalidPdf(String),

    #[error("Extraction task did not complete: {0}")]
    Task(String),
}

/// Resolves the document kind from the declared content type, falling back to
/// the file extension when the browser sent nothing useful.
pub fn resolve_kind(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<DocumentKind, ExtractionError> {
    let declared = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && !ct.starts_with("application/octet-stream"));

    match declared {
        Some(ct) => {
            DocumentKind::from_mime(ct).ok_or_else(|| ExtractionError::UnsupportedContentType(ct.to_string()))
        }
        None => file_name
            .and_then(DocumentKind::from_file_name)
            .ok_or_else(|| {
                ExtractionError::UnsupportedContentType(
                    file_name.unwrap_or("unknown").to_string(),
                )
            }),
    }
}

/// Extracts plain text from raw upload bytes of the given kind.
pub fn extract_document(
    bytes: &[u8],
    kind: DocumentKind,
) -> Result<ExtractedDocument, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let document = match kind {
        DocumentKind::PlainText => ExtractedDocument {
            text: String::from_utf8(bytes.to_vec())?,
            kind,
            page_count: None,
        },
        DocumentKind::Pdf => {
            let pdf = pdf::extract_pdf_text(bytes)?;
            ExtractedDocument {
                text: pdf.text,
                kind,
                page_count: Some(pdf.page_count),
            }
        }
    };

    info!(
        "Extracted {} chars from {} upload ({} bytes)",
        document.char_count(),
        kind.mime(),
        bytes.len()
    );
    Ok(document)
}

/// Runs extraction on the blocking pool; PDF parsing is CPU bound.
pub async fn extract_document_blocking(
    bytes: bytes::Bytes,
    kind: DocumentKind,
) -> Result<ExtractedDocument, ExtractionError> {
    debug!("Scheduling extraction of {} bytes", bytes.len());
    tokio::task::spawn_blocking(move || extract_document(&bytes, kind))
        .await
        .map_err(task_failure)?
}

fn task_failure(e: JoinError) -> ExtractionError {
    warn!("Extraction task failed: {e}");
    ExtractionError::Task(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_decoded_verbatim() {
        let raw = "Jane Doe\r\n  Senior Rust Engineer — 8 yrs\n\tKubernetes, gRPC\n".as_bytes();
        let doc = extract_document(raw, DocumentKind::PlainText).unwrap();
        assert_eq!(doc.text.as_bytes(), raw);
        assert_eq!(doc.kind, DocumentKind::PlainText);
        assert_eq!(doc.page_count, None);
    }

    #[test]
    fn test_invalid_utf8_is_an_extraction_error() {
        let err = extract_document(&[0x52, 0xff, 0xfe], DocumentKind::PlainText).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUtf8(_)));
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let err = extract_document(b"", DocumentKind::PlainText).unwrap_err();
        assert!(matches!(err, ExtractionError::Empty));
    }

    #[test]
    fn test_garbage_pdf_is_an_extraction_error() {
        let err = extract_document(b"definitely not a pdf", DocumentKind::Pdf).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidPdf(_)));
    }

    #[test]
    fn test_resolve_kind_prefers_declared_type() {
        let kind = resolve_kind(Some("application/pdf"), Some("resume.txt")).unwrap();
        assert_eq!(kind, DocumentKind::Pdf);
    }

    #[test]
    fn test_resolve_kind_falls_back_to_extension() {
        assert_eq!(
            resolve_kind(None, Some("resume.pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            resolve_kind(Some("application/octet-stream"), Some("cv.txt")).unwrap(),
            DocumentKind::PlainText
        );
    }

    #[test]
    fn test_resolve_kind_rejects_other_types() {
        let err = resolve_kind(Some("image/png"), Some("resume.png")).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedContentType(ct) if ct == "image/png"));
        assert!(resolve_kind(None, Some("resume.docx")).is_err());
        assert!(resolve_kind(None, None).is_err());
    }

    #[tokio::test]
    async fn test_blocking_extraction_matches_inline() {
        let bytes = bytes::Bytes::from_static(b"Rust, Tokio, Axum");
        let doc = extract_document_blocking(bytes, DocumentKind::PlainText)
            .await
            .unwrap();
        assert_eq!(doc.text, "Rust, Tokio, Axum");
    }

    #[tokio::test]
    async fn test_failed_task_is_not_reported_as_bad_pdf() {
        let join_error = tokio::task::spawn_blocking(|| panic!("worker died"))
            .await
            .unwrap_err();
        let err = task_failure(join_error);
        assert!(matches!(err, ExtractionError::Task(_)));
        assert!(!err.to_string().contains("Could not read PDF"));
    }
}
