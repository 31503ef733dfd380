//! Bedrock Agent Runtime backed knowledge base.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_bedrockagentruntime::config::Credentials;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration, KnowledgeBaseRetrievalResult,
    KnowledgeBaseVectorSearchConfiguration, RetrievalResultLocation,
};
use aws_sdk_bedrockagentruntime::Client;
use thiserror::Error;
use tracing::{info, warn};

use super::{KnowledgeBase, QueryError, RawContent, RawRetrievalResult, RetrieveRequest, RetrieveResponse};
use crate::config::Config;
use crate::models::retrieval::{ResultLocation, S3Location, WebLocation};

/// Failure to build a usable client. Fatal for the process.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("No AWS region configured")]
    MissingRegion,

    #[error("No knowledge base id configured")]
    MissingKnowledgeBaseId,

    #[error("No AWS credentials provider available")]
    NoCredentialsProvider,

    #[error("Could not resolve AWS credentials: {0}")]
    Credentials(String),
}

#[derive(Clone)]
pub struct BedrockKnowledgeBase {
    client: Client,
    knowledge_base_id: String,
}

impl BedrockKnowledgeBase {
    pub fn new(client: Client, knowledge_base_id: String) -> Self {
        Self {
            client,
            knowledge_base_id,
        }
    }
}

/// Builds the Bedrock Agent Runtime client for the configured region and
/// verifies that credentials resolve before any query is attempted.
pub async fn init_client(config: &Config) -> Result<BedrockKnowledgeBase, ConnectionError> {
    if config.aws_region.trim().is_empty() {
        return Err(ConnectionError::MissingRegion);
    }
    if config.knowledge_base_id.trim().is_empty() {
        return Err(ConnectionError::MissingKnowledgeBaseId);
    }

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
        loader = loader.credentials_provider(Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "jobsearch-static",
        ));
    }
    if let Some(endpoint) = &config.bedrock_endpoint_url {
        info!("Using Bedrock endpoint override {endpoint}");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;

    let provider = sdk_config
        .credentials_provider()
        .ok_or(ConnectionError::NoCredentialsProvider)?;
    provider
        .provide_credentials()
        .await
        .map_err(|e| ConnectionError::Credentials(DisplayErrorContext(&e).to_string()))?;

    info!(
        "Bedrock client initialized (region: {}, knowledge base: {})",
        config.aws_region, config.knowledge_base_id
    );

    Ok(BedrockKnowledgeBase::new(
        Client::new(&sdk_config),
        config.knowledge_base_id.clone(),
    ))
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    fn knowledge_base_id(&self) -> &str {
        &self.knowledge_base_id
    }

    async fn retrieve(&self, request: RetrieveRequest) -> Result<RetrieveResponse, QueryError> {
        let (query, configuration) = retrieval_inputs(&request);

        let output = self
            .client
            .retrieve()
            .knowledge_base_id(request.knowledge_base_id)
            .retrieval_query(query)
            .retrieval_configuration(configuration)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                warn!("Bedrock retrieve failed: {message}");
                QueryError::Service(message)
            })?;

        Ok(RetrieveResponse {
            retrieval_results: Some(
                output
                    .retrieval_results()
                    .iter()
                    .map(convert_result)
                    .collect(),
            ),
        })
    }
}

/// SDK query and vector search configuration for one request.
fn retrieval_inputs(
    request: &RetrieveRequest,
) -> (KnowledgeBaseQuery, KnowledgeBaseRetrievalConfiguration) {
    let query = KnowledgeBaseQuery::builder()
        .text(request.retrieval_query.text.clone())
        .build();
    let configuration = KnowledgeBaseRetrievalConfiguration::builder()
        .vector_search_configuration(
            KnowledgeBaseVectorSearchConfiguration::builder()
                .number_of_results(i32::from(request.number_of_results().get()))
                .build(),
        )
        .build();
    (query, configuration)
}

fn convert_result(result: &KnowledgeBaseRetrievalResult) -> RawRetrievalResult {
    RawRetrievalResult {
        content: result.content().map(|content| RawContent {
            text: Some(content.text().to_string()),
        }),
        score: result.score(),
        location: result.location().map(convert_location),
    }
}

fn convert_location(location: &RetrievalResultLocation) -> ResultLocation {
    ResultLocation {
        location_type: Some(location.r#type().as_str().to_string()),
        s3_location: location.s3_location().map(|s3| S3Location {
            uri: s3.uri().map(str::to_string),
        }),
        web_location: location.web_location().map(|web| WebLocation {
            url: web.url().map(str::to_string),
        }),
    }
}
