//! Multipart form parsing shared by the HTML page and the JSON API.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::extraction::{extract_document_blocking, resolve_kind, ExtractionError};
use crate::models::document::ExtractedDocument;
use crate::models::retrieval::ResultCount;

pub const FILE_FIELD: &str = "file";
pub const RESULT_COUNT_FIELD: &str = "result_count";

/// One uploaded file as received from the browser.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Fields of a search form submission. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct SearchForm {
    pub file: Option<UploadedFile>,
    pub result_count: Option<ResultCount>,
}

impl SearchForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = SearchForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed form data: {}", e.body_text())))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FILE_FIELD => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read upload: {}", e.body_text()))
                    })?;

                    // Browsers submit an empty, nameless part when no file was picked.
                    let nothing_selected =
                        bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty();
                    if !nothing_selected {
                        form.file = Some(UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        });
                    }
                }
                RESULT_COUNT_FIELD => {
                    let raw = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read result count: {}", e.body_text()))
                    })?;
                    form.result_count = parse_result_count(&raw)?;
                }
                other => debug!("Ignoring form field '{other}'"),
            }
        }

        Ok(form)
    }
}

/// Parses the numeric input; blank means "not provided".
pub fn parse_result_count(raw: &str) -> Result<Option<ResultCount>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(|n| Some(ResultCount::clamped(n)))
        .map_err(|_| AppError::Validation(format!("result_count must be an integer, got '{raw}'")))
}

/// Resolves the upload's type and extracts its text.
pub async fn extract_upload(file: UploadedFile) -> Result<ExtractedDocument, ExtractionError> {
    let kind = resolve_kind(file.content_type.as_deref(), file.file_name.as_deref())?;
    extract_document_blocking(file.bytes, kind).await
}

/// What became of the optional resume upload for one submission.
#[derive(Debug)]
pub enum UploadOutcome {
    NoFile,
    Extracted(ExtractedDocument),
    Failed(ExtractionError),
}

impl UploadOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            UploadOutcome::Extracted(document) => Some(document.text.as_str()),
            _ => None,
        }
    }
}

pub async fn extract_optional_upload(file: Option<UploadedFile>) -> UploadOutcome {
    match file {
        None => UploadOutcome::NoFile,
        Some(file) => match extract_upload(file).await {
            Ok(document) => UploadOutcome::Extracted(document),
            Err(e) => UploadOutcome::Failed(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentKind;

    #[test]
    fn test_parse_result_count_clamps() {
        assert_eq!(parse_result_count("5").unwrap().map(ResultCount::get), Some(5));
        assert_eq!(parse_result_count(" 0 ").unwrap().map(ResultCount::get), Some(1));
        assert_eq!(parse_result_count("25").unwrap().map(ResultCount::get), Some(10));
    }

    #[test]
    fn test_parse_result_count_blank_is_none() {
        assert!(parse_result_count("").unwrap().is_none());
        assert!(parse_result_count("   ").unwrap().is_none());
    }

    #[test]
    fn test_parse_result_count_rejects_text() {
        assert!(matches!(
            parse_result_count("three"),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_extract_upload_infers_type_from_name() {
        let file = UploadedFile {
            file_name: Some("resume.txt".to_string()),
            content_type: None,
            bytes: Bytes::from_static(b"Platform engineer"),
        };
        let doc = extract_upload(file).await.unwrap();
        assert_eq!(doc.kind, DocumentKind::PlainText);
        assert_eq!(doc.text, "Platform engineer");
    }

    #[tokio::test]
    async fn test_failed_upload_carries_no_text() {
        let file = UploadedFile {
            file_name: Some("resume.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"\x89PNG"),
        };
        let outcome = extract_optional_upload(Some(file)).await;
        assert!(matches!(outcome, UploadOutcome::Failed(ExtractionError::UnsupportedContentType(_))));
        assert!(outcome.text().is_none());
        assert!(matches!(extract_optional_upload(None).await, UploadOutcome::NoFile));
    }
}
