//! Relay transport — how the chat client reaches the relay endpoint.

use async_trait::async_trait;
use letrades_core::message::RelayRequest;
use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use url::Url;

/// Chat path under the relay base URL.
pub const CHAT_PATH: &str = "api/chat";
/// Liveness path under the relay base URL.
pub const HEALTH_PATH: &str = "api/health";

/// Failures of a relay call, as shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Oops! Received non-JSON response from server")]
    NonJson,

    #[error("Invalid response from server")]
    InvalidResponse,

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Network(String),

    #[error("Invalid relay URL: {0}")]
    InvalidEndpoint(String),
}

/// Where the relay lives.
///
/// A local server, a same-origin function path and a fixed external function
/// URL all speak the same contract; they only differ in these URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    pub chat_url: Url,
    pub health_url: Url,
}

impl RelayEndpoint {
    /// Endpoint for a relay server rooted at `base` (e.g. `http://localhost:3001`).
    pub fn from_base(base: &str) -> Result<Self, ClientError> {
        let mut base = base.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let root = Url::parse(&base).map_err(|e| ClientError::InvalidEndpoint(format!("{base}: {e}")))?;
        let join = |path: &str| {
            root.join(path)
                .map_err(|e| ClientError::InvalidEndpoint(format!("{base}{path}: {e}")))
        };
        Ok(Self {
            chat_url: join(CHAT_PATH)?,
            health_url: join(HEALTH_PATH)?,
        })
    }

    /// Endpoint with explicit URLs, for relays not laid out under one base.
    pub fn new(chat_url: &str, health_url: &str) -> Result<Self, ClientError> {
        let parse = |u: &str| {
            Url::parse(u).map_err(|e| ClientError::InvalidEndpoint(format!("{u}: {e}")))
        };
        Ok(Self {
            chat_url: parse(chat_url)?,
            health_url: parse(health_url)?,
        })
    }
}

/// One call to the relay per user turn.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Send a chat request and return the reply text.
    async fn send(&self, request: &RelayRequest) -> Result<String, ClientError>;

    /// Probe the relay's liveness endpoint.
    async fn health(&self) -> Result<bool, ClientError>;
}

/// HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    client: Client,
    endpoint: RelayEndpoint,
}

impl HttpRelay {
    pub fn new(endpoint: RelayEndpoint) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &RelayEndpoint {
        &self.endpoint
    }
}

#[async_trait]
impl RelayTransport for HttpRelay {
    async fn send(&self, request: &RelayRequest) -> Result<String, ClientError> {
        debug!("POST {}", self.endpoint.chat_url);

        let resp = self
            .client
            .post(self.endpoint.chat_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Err(ClientError::NonJson);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        body.get("text")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(ClientError::InvalidResponse)
    }

    async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .client
            .get(self.endpoint.health_url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(resp.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_endpoint_joins_api_paths() {
        let ep = RelayEndpoint::from_base("http://localhost:3001").unwrap();
        assert_eq!(ep.chat_url.as_str(), "http://localhost:3001/api/chat");
        assert_eq!(ep.health_url.as_str(), "http://localhost:3001/api/health");
    }

    #[test]
    fn base_with_prefix_is_preserved() {
        let ep = RelayEndpoint::from_base("https://example.com/.netlify/functions/").unwrap();
        assert_eq!(
            ep.chat_url.as_str(),
            "https://example.com/.netlify/functions/api/chat"
        );
    }

    #[test]
    fn explicit_endpoint_keeps_urls() {
        let ep = RelayEndpoint::new(
            "https://us-central1.example.net/chatFunction",
            "https://us-central1.example.net/health",
        )
        .unwrap();
        assert_eq!(ep.chat_url.path(), "/chatFunction");
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(matches!(
            RelayEndpoint::from_base("localhost without scheme"),
            Err(ClientError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn status_error_text() {
        assert_eq!(ClientError::Status(500).to_string(), "HTTP error! status: 500");
    }
}
