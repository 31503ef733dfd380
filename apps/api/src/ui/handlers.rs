use axum::{
    extract::{Multipart, State},
    response::Html,
};
use tracing::warn;

use crate::errors::AppError;
use crate::search::upload::{extract_optional_upload, SearchForm, UploadOutcome};
use crate::state::AppState;
use crate::ui::page::{
    render_page, Notice, PageView, MISSING_COUNT_WARNING, UPLOAD_SUCCESS,
};

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&PageView {
        result_count: state.config.default_result_count,
        ..Default::default()
    }))
}

/// POST /
///
/// Extracts the uploaded resume (failures are reported and the query runs
/// without it), then runs one knowledge base query and renders the results.
pub async fn handle_submit(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let mut view = PageView {
        result_count: state.config.default_result_count,
        ..Default::default()
    };

    let form = match SearchForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            view.notices.push(Notice::error(e.parts().2));
            return Html(render_page(&view));
        }
    };

    let resume = match extract_optional_upload(form.file).await {
        UploadOutcome::NoFile => None,
        UploadOutcome::Extracted(document) => {
            view.notices.push(Notice::success(UPLOAD_SUCCESS));
            Some(document)
        }
        UploadOutcome::Failed(e) => {
            warn!("Upload could not be extracted: {e}");
            view.notices.push(Notice::error(AppError::from(e).parts().2));
            None
        }
    };

    let Some(count) = form.result_count else {
        view.notices.push(Notice::warning(MISSING_COUNT_WARNING));
        return Html(render_page(&view));
    };
    view.result_count = count;

    match state
        .session
        .search(count, resume.as_ref().map(|d| d.text.as_str()))
        .await
    {
        Ok(outcome) => view.outcome = Some(outcome),
        Err(e) => view.notices.push(Notice::error(AppError::from(e).parts().2)),
    }

    Html(render_page(&view))
}
