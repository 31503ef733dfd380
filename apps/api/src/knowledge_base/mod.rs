//! Knowledge base access: the only place the retrieval service is called.
//!
//! The `KnowledgeBase` trait mirrors the service's `Retrieve` call shape so the
//! Bedrock-backed client can be swapped for a stub without touching handlers.
//! Ranking is entirely remote; results keep the order the service returned.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::retrieval::{ResultCount, ResultLocation, RetrievalResult};

pub mod bedrock;
pub mod prompts;
#[cfg(test)]
pub mod stub;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Knowledge base request failed: {0}")]
    Service(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire shapes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveRequest {
    pub knowledge_base_id: String,
    pub retrieval_query: RetrievalQuery,
    pub retrieval_configuration: RetrievalConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalQuery {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalConfiguration {
    pub vector_search_configuration: VectorSearchConfiguration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorSearchConfiguration {
    pub number_of_results: ResultCount,
}

impl RetrieveRequest {
    pub fn new(knowledge_base_id: &str, query: String, count: ResultCount) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.to_string(),
            retrieval_query: RetrievalQuery { text: query },
            retrieval_configuration: RetrievalConfiguration {
                vector_search_configuration: VectorSearchConfiguration {
                    number_of_results: count,
                },
            },
        }
    }

    pub fn number_of_results(&self) -> ResultCount {
        self.retrieval_configuration
            .vector_search_configuration
            .number_of_results
    }
}

/// Service response. `retrieval_results` is `None` when the field is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveResponse {
    #[serde(default)]
    pub retrieval_results: Option<Vec<RawRetrievalResult>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRetrievalResult {
    #[serde(default)]
    pub content: Option<RawContent>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub location: Option<ResultLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub text: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait + invoker
// ────────────────────────────────────────────────────────────────────────────

/// A remote knowledge base that answers one retrieval query per call.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    fn knowledge_base_id(&self) -> &str;

    async fn retrieve(&self, request: RetrieveRequest) -> Result<RetrieveResponse, QueryError>;
}

/// Issues a single job-description query for the given resume text.
///
/// Returns `Ok(None)` when the response carried no result list, `Ok(Some(vec![]))`
/// when it carried an empty one.
pub async fn query_knowledge_base(
    knowledge_base: &dyn KnowledgeBase,
    count: ResultCount,
    resume: Option<&str>,
) -> Result<Option<Vec<RetrievalResult>>, QueryError> {
    let query = prompts::build_jd_match_query(resume);
    let request = RetrieveRequest::new(knowledge_base.knowledge_base_id(), query, count);

    info!(
        "Querying knowledge base {} for {} results (resume attached: {})",
        request.knowledge_base_id,
        count.get(),
        resume.is_some()
    );

    let response = knowledge_base.retrieve(request).await?;
    let results = normalize_response(response);

    match &results {
        Some(hits) => debug!("Knowledge base returned {} results", hits.len()),
        None => debug!("Knowledge base response had no retrievalResults field"),
    }
    Ok(results)
}

/// Flattens raw hits into `RetrievalResult`s, keeping service order.
pub fn normalize_response(response: RetrieveResponse) -> Option<Vec<RetrievalResult>> {
    response.retrieval_results.map(|hits| {
        hits.into_iter()
            .map(|hit| RetrievalResult {
                content: hit.content.and_then(|c| c.text).unwrap_or_default(),
                score: hit.score.unwrap_or(0.0),
                location: hit.location.unwrap_or_default(),
            })
            .collect()
    })
}
