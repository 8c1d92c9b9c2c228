//! Upstream completion API — wire types and the client seam.
//!
//! [`CompletionApi`] is the single outbound call the relay makes.
//! [`anthropic::AnthropicClient`] implements it over HTTPS; tests substitute
//! their own implementations.

pub mod anthropic;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors from the outbound completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("{0}")]
    Transport(String),

    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },

    #[error("Response parse error: {0}")]
    Decode(String),

    #[error("Client setup error: {0}")]
    Setup(String),
}

/// Conversation role of a completion message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

/// Outbound completion request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<CompletionMessage>,
}

/// One content segment of a completion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Completion response body. Only `content` is consumed.
///
/// A missing, null or non-array `content` decodes as empty, so it reaches
/// the relay as "no segments" rather than as a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default, deserialize_with = "lenient_segments")]
    pub content: Vec<ContentSegment>,
}

/// Non-array `content` becomes empty; an element that is not a segment
/// object becomes a segment without text.
fn lenient_segments<'de, D>(deserializer: D) -> Result<Vec<ContentSegment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).unwrap_or(ContentSegment {
                kind: String::new(),
                text: None,
            })
        })
        .collect())
}

impl CompletionResponse {
    /// Text of the first content segment, if there is one.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .first()
            .map(|segment| segment.text.as_deref().unwrap_or_default())
    }
}

/// The outbound completion call.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}
