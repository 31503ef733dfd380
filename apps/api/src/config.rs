use anyhow::{Context, Result};

use crate::models::retrieval::ResultCount;

const DEFAULT_REGION: &str = "us-west-2";
const DEFAULT_KNOWLEDGE_BASE_ID: &str = "2FATY2MKWF";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Region and knowledge base id are deployment constants, never user input.
#[derive(Debug, Clone)]
pub struct Config {
    pub aws_region: String,
    pub knowledge_base_id: String,
    /// Overrides the Bedrock Agent Runtime endpoint (local stacks, VPC endpoints).
    pub bedrock_endpoint_url: Option<String>,
    /// Static credentials are used only when both halves are present.
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub default_result_count: ResultCount,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            aws_region: optional_env("AWS_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            knowledge_base_id: optional_env("KNOWLEDGE_BASE_ID")
                .unwrap_or_else(|| DEFAULT_KNOWLEDGE_BASE_ID.to_string()),
            bedrock_endpoint_url: optional_env("BEDROCK_ENDPOINT_URL"),
            aws_access_key_id: optional_env("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: optional_env("AWS_SECRET_ACCESS_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match optional_env("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            default_result_count: match optional_env("DEFAULT_RESULT_COUNT") {
                Some(raw) => ResultCount::clamped(
                    raw.parse::<i64>()
                        .context("DEFAULT_RESULT_COUNT must be an integer")?,
                ),
                None => ResultCount::default(),
            },
        })
    }

    /// Returns the static key pair when both parts are configured.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

/// Reads an env var, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for handler and client tests.
    pub fn for_tests() -> Self {
        Config {
            aws_region: DEFAULT_REGION.to_string(),
            knowledge_base_id: "TESTKB0001".to_string(),
            bedrock_endpoint_url: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_result_count: ResultCount::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials_require_both_halves() {
        let mut config = Config::for_tests();
        assert!(config.static_credentials().is_none());

        config.aws_access_key_id = Some("AKIDEXAMPLE".to_string());
        assert!(config.static_credentials().is_none());

        config.aws_secret_access_key = Some("secret".to_string());
        assert_eq!(config.static_credentials(), Some(("AKIDEXAMPLE", "secret")));
    }

    #[test]
    fn test_default_result_count_is_three() {
        assert_eq!(Config::for_tests().default_result_count.get(), 3);
    }
}
