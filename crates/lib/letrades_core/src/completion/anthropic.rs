//! Anthropic Messages API client.
//!
//! Sends one `POST /v1/messages` per call. No retry: a failed call is
//! reported to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use super::{CompletionApi, CompletionError, CompletionRequest, CompletionResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

const MESSAGES_PATH: &str = "v1/messages";

/// HTTPS client for the Messages endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    endpoint: Url,
}

impl AnthropicClient {
    /// Build a client against `base_url` (e.g. `https://api.anthropic.com`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CompletionError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|u| u.join(MESSAGES_PATH))
            .map_err(|e| CompletionError::Setup(format!("Invalid base URL {base_url}: {e}")))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Setup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Full URL of the Messages endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionApi for AnthropicClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        debug!(endpoint = %self.endpoint, model = %request.model, "sending completion request");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            error!(status = status.as_u16(), body = %body, "upstream error details");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp
            .text()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;
        Ok(decode_body(&raw))
    }
}

/// Decode a 2xx body. A body that is not JSON, or has no content segments,
/// yields an empty response and logs the raw body.
fn decode_body(raw: &str) -> CompletionResponse {
    let response = serde_json::from_str::<CompletionResponse>(raw).unwrap_or_else(|e| {
        error!(error = %e, "upstream response is not a JSON object");
        CompletionResponse::default()
    });
    if response.content.is_empty() {
        error!(body = %raw, "upstream response has no content segments");
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_messages_path() {
        let client = AnthropicClient::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn base_with_path_keeps_prefix() {
        let client = AnthropicClient::new("http://127.0.0.1:9000/proxy", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://127.0.0.1:9000/proxy/v1/messages"
        );
    }

    #[test]
    fn invalid_base_url_is_setup_error() {
        let err = AnthropicClient::new("not a url", DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, CompletionError::Setup(_)));
    }

    #[test]
    fn decodes_text_segment() {
        let resp = decode_body(r#"{"content":[{"type":"text","text":"hi"}]}"#);
        assert_eq!(resp.first_text(), Some("hi"));
    }

    #[test]
    fn malformed_bodies_decode_as_empty() {
        for raw in [
            r#"{"content":null}"#,
            r#"{"content":"oops"}"#,
            r#"{"id":"msg_1"}"#,
            r#"[1,2,3]"#,
            "<html>gateway</html>",
        ] {
            assert!(decode_body(raw).content.is_empty(), "body: {raw}");
        }
    }

    #[test]
    fn status_error_message_names_code() {
        let err = CompletionError::Status {
            status: 401,
            body: "{}".into(),
        };
        assert_eq!(err.to_string(), "Request failed with status code 401");
    }
}
