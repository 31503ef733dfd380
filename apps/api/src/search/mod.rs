// Job search flow: upload → extract → single knowledge base query.
// Handlers here and in `ui` only decide presentation; extraction and
// retrieval return typed results.

pub mod handlers;
pub mod session;
pub mod upload;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::retrieval::{ResultCount, RetrievalResult};

/// Result of one user-triggered query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query_id: Uuid,
    pub retrieved_at: DateTime<Utc>,
    pub result_count: ResultCount,
    pub resume_attached: bool,
    /// `None` when the service response carried no result list.
    pub results: Option<Vec<RetrievalResult>>,
}

impl SearchOutcome {
    /// Hits to display; absent and empty lists both yield an empty slice.
    pub fn hits(&self) -> &[RetrievalResult] {
        self.results.as_deref().unwrap_or_default()
    }
}
