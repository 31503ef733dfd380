pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;
use crate::ui::handlers as ui;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Browser page
        .route("/", get(ui::handle_index).post(ui::handle_submit))
        // JSON API
        .route(
            "/api/v1/documents/extract",
            post(handlers::handle_extract),
        )
        .route("/api/v1/jobs/search", post(handlers::handle_search_upload))
        .route("/api/v1/jobs/query", post(handlers::handle_query))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
