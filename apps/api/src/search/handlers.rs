//! JSON endpoints for extraction and job description search.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::document::{DocumentKind, ExtractedDocument};
use crate::models::retrieval::ResultCount;
use crate::search::upload::{extract_optional_upload, extract_upload, SearchForm, UploadOutcome};
use crate::search::SearchOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub kind: DocumentKind,
    pub page_count: Option<usize>,
    pub char_count: usize,
}

impl From<ExtractedDocument> for ExtractResponse {
    fn from(document: ExtractedDocument) -> Self {
        Self {
            char_count: document.char_count(),
            text: document.text,
            kind: document.kind,
            page_count: document.page_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub outcome: SearchOutcome,
    /// Set when an uploaded file could not be read; the query ran without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction_error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub result_count: Option<ResultCount>,
}

/// POST /api/v1/documents/extract
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let form = SearchForm::from_multipart(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("A 'file' field is required".to_string()))?;

    let document = extract_upload(file).await?;
    Ok(Json(document.into()))
}

/// POST /api/v1/jobs/search
///
/// Multipart variant of the page flow: an unreadable file is reported in
/// `extraction_error` and the query proceeds without resume text.
pub async fn handle_search_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SearchResponse>, AppError> {
    let form = SearchForm::from_multipart(multipart).await?;
    let count = form
        .result_count
        .unwrap_or(state.config.default_result_count);

    let upload = extract_optional_upload(form.file).await;
    let extraction_error = match &upload {
        UploadOutcome::Failed(e) => Some(e.to_string()),
        _ => None,
    };

    let outcome = state.session.search(count, upload.text()).await?;
    Ok(Json(SearchResponse {
        outcome,
        extraction_error,
    }))
}

/// POST /api/v1/jobs/query
pub async fn handle_query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let count = request
        .result_count
        .unwrap_or(state.config.default_result_count);
    let resume = request
        .resume_text
        .as_deref()
        .filter(|text| !text.trim().is_empty());

    let outcome = state.session.search(count, resume).await?;
    Ok(Json(SearchResponse {
        outcome,
        extraction_error: None,
    }))
}
