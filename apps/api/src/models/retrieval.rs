use serde::{Deserialize, Serialize};

/// Shown when a result carries no S3 object reference.
pub const NO_S3_LOCATION: &str = "No S3 URL available";

/// Number of hits requested from the knowledge base. Always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct ResultCount(u8);

impl ResultCount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const DEFAULT: u8 = 3;

    /// Clamps any integer into the accepted range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ResultCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<i64> for ResultCount {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<ResultCount> for u8 {
    fn from(count: ResultCount) -> Self {
        count.0
    }
}

/// One matched job description fragment, in the order the service ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub content: String,
    pub score: f64,
    pub location: ResultLocation,
}

/// Source location metadata attached to a retrieval hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultLocation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_location: Option<S3Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_location: Option<WebLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct S3Location {
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebLocation {
    #[serde(default)]
    pub url: Option<String>,
}

impl ResultLocation {
    pub fn s3_uri(&self) -> Option<&str> {
        self.s3_location.as_ref().and_then(|s3| s3.uri.as_deref())
    }

    /// Storage hint for display: the S3 URI, or a fixed placeholder.
    pub fn storage_hint(&self) -> &str {
        self.s3_uri().unwrap_or(NO_S3_LOCATION)
    }
}
