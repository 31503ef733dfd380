use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::knowledge_base::{query_knowledge_base, KnowledgeBase, QueryError};
use crate::models::retrieval::ResultCount;
use crate::search::SearchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryState {
    Idle,
    QueryInFlight,
}

/// Owns the knowledge base handle and allows one query in flight at a time.
/// A second query waits until the first has returned to `Idle`.
#[derive(Clone)]
pub struct SearchSession {
    knowledge_base: Arc<dyn KnowledgeBase>,
    gate: Arc<Mutex<()>>,
}

impl SearchSession {
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>) -> Self {
        Self {
            knowledge_base,
            gate: Arc::new(Mutex::new(())),
        }
    }

    pub fn state(&self) -> QueryState {
        match self.gate.try_lock() {
            Ok(_) => QueryState::Idle,
            Err(_) => QueryState::QueryInFlight,
        }
    }

    pub async fn search(
        &self,
        count: ResultCount,
        resume: Option<&str>,
    ) -> Result<SearchOutcome, QueryError> {
        let _in_flight = self.gate.lock().await;
        let query_id = Uuid::new_v4();
        info!("Query {query_id} started");

        let results = query_knowledge_base(self.knowledge_base.as_ref(), count, resume).await;
        info!("Query {query_id} finished (ok: {})", results.is_ok());

        Ok(SearchOutcome {
            query_id,
            retrieved_at: Utc::now(),
            result_count: count,
            resume_attached: resume.is_some(),
            results: results?,
        })
    }
}
