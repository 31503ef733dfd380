//! In-memory `KnowledgeBase` used by tests. Records every request it sees.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{KnowledgeBase, QueryError, RawContent, RawRetrievalResult, RetrieveRequest, RetrieveResponse};
use crate::models::retrieval::{ResultLocation, S3Location};

#[derive(Clone)]
pub struct StubKnowledgeBase {
    requests: Arc<Mutex<Vec<RetrieveRequest>>>,
    outcome: Result<RetrieveResponse, String>,
}

impl StubKnowledgeBase {
    pub fn new(outcome: Result<RetrieveResponse, String>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    /// Returns one S3-backed hit per score, in the given order.
    pub fn with_scores(scores: &[f64]) -> Self {
        let hits = scores
            .iter()
            .enumerate()
            .map(|(i, score)| RawRetrievalResult {
                content: Some(RawContent {
                    text: Some(format!("Job description {}", i + 1)),
                }),
                score: Some(*score),
                location: Some(ResultLocation {
                    location_type: Some("S3".to_string()),
                    s3_location: Some(S3Location {
                        uri: Some(format!("s3://job-descriptions/jd-{}.txt", i + 1)),
                    }),
                    web_location: None,
                }),
            })
            .collect();
        Self::new(Ok(RetrieveResponse {
            retrieval_results: Some(hits),
        }))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_string()))
    }

    pub async fn recorded_requests(&self) -> Vec<RetrieveRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl KnowledgeBase for StubKnowledgeBase {
    fn knowledge_base_id(&self) -> &str {
        "STUBKB0001"
    }

    async fn retrieve(&self, request: RetrieveRequest) -> Result<RetrieveResponse, QueryError> {
        self.requests.lock().await.push(request);
        self.outcome.clone().map_err(QueryError::Service)
    }
}
