//! The relay operation: one inbound chat request, one outbound completion.
//!
//! Stateless. Only the latest user utterance and the business list are
//! forwarded; earlier turns of the conversation are never sent upstream.

use thiserror::Error;
use tracing::{error, info};

use crate::completion::{CompletionApi, CompletionError};
use crate::message::RelayRequest;
use crate::prompt::{self, PromptSettings};

/// Relay failures. Every variant is terminal for the triggering request.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Anthropic API key is not set")]
    MissingCredential,

    #[error("Failed to serialize business list: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("Error from Anthropic API: {0}")]
    Upstream(#[from] CompletionError),

    #[error("Unexpected response from Anthropic API")]
    UnexpectedResponse,
}

/// Settings the relay needs for each request.
#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    /// Upstream credential. `None` fails every request before any outbound call.
    pub api_key: Option<String>,
    pub prompt: PromptSettings,
}

/// Forward `request` to the completion API and return the first text segment.
pub async fn relay(
    settings: &RelaySettings,
    api: &dyn CompletionApi,
    request: &RelayRequest,
) -> Result<String, RelayError> {
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .ok_or(RelayError::MissingCredential)?;

    let completion = prompt::build_request(&settings.prompt, &request.user_input, &request.businesses)?;

    let response = api.complete(api_key, &completion).await.map_err(|e| {
        error!("Error calling Anthropic API: {e}");
        RelayError::Upstream(e)
    })?;

    let text = response.first_text().ok_or_else(|| {
        error!("Anthropic API returned no content segments");
        RelayError::UnexpectedResponse
    })?;

    info!(
        businesses = request.businesses.len(),
        reply_len = text.len(),
        "relayed chat message"
    );
    Ok(text.to_string())
}
