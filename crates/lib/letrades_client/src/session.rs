//! Chat session — the ordered turn list and the submit flow around it.
//!
//! A submit appends the user turn immediately, then settles with either an
//! assistant turn or an error banner. The user turn is never rolled back.

use letrades_core::business::Business;
use letrades_core::message::{RelayRequest, Turn};
use log::{info, warn};

use crate::transport::{ClientError, RelayTransport};

/// Optional behaviours of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Probe the relay's liveness endpoint on demand.
    pub status_check: bool,
}

/// How a submit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty after trimming; nothing happened.
    Ignored,
    /// An assistant turn was appended.
    Replied,
    /// The error banner was set.
    Failed,
}

/// Client-side chat state for one session.
pub struct ChatSession<T> {
    transport: T,
    businesses: Vec<Business>,
    capabilities: Capabilities,
    turns: Vec<Turn>,
    input: String,
    loading: bool,
    error: Option<String>,
    scroll_anchor: Option<usize>,
    relay_online: Option<bool>,
}

impl<T> ChatSession<T> {
    pub fn new(transport: T, businesses: Vec<Business>) -> Self {
        Self::with_capabilities(transport, businesses, Capabilities::default())
    }

    pub fn with_capabilities(
        transport: T,
        businesses: Vec<Business>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            transport,
            businesses,
            capabilities,
            turns: Vec::new(),
            input: String::new(),
            loading: false,
            error: None,
            scroll_anchor: None,
            relay_online: None,
        }
    }

    /// Transport used for relay calls, for callers driving `begin`/`settle` themselves.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Input and send controls are disabled while a request is in flight.
    pub fn is_input_enabled(&self) -> bool {
        !self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Index of the newest turn; the view keeps it in sight.
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// Result of the last status check, if one ran.
    pub fn relay_online(&self) -> Option<bool> {
        self.relay_online
    }

    fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.scroll_anchor = Some(self.turns.len() - 1);
    }

    /// First half of a submit. Returns the request to send, or `None` when
    /// the text is blank.
    pub fn begin(&mut self, text: &str) -> Option<RelayRequest> {
        if text.trim().is_empty() {
            return None;
        }

        self.push_turn(Turn::user(text));
        self.input.clear();
        self.loading = true;
        self.error = None;

        Some(RelayRequest {
            user_input: text.to_string(),
            businesses: self.businesses.clone(),
        })
    }

    /// Second half of a submit: apply the relay result and clear loading.
    pub fn settle(&mut self, result: Result<String, ClientError>) -> SubmitOutcome {
        let outcome = match result {
            Ok(text) if !text.is_empty() => {
                self.push_turn(Turn::assistant(text));
                SubmitOutcome::Replied
            }
            Ok(_) => self.fail(ClientError::InvalidResponse),
            Err(e) => self.fail(e),
        };
        self.loading = false;
        outcome
    }

    fn fail(&mut self, e: ClientError) -> SubmitOutcome {
        warn!("Error sending message: {e}");
        self.error = Some(format!(
            "Unable to get a response: {e}. Please try again later."
        ));
        SubmitOutcome::Failed
    }
}

impl<T: RelayTransport> ChatSession<T> {
    /// Submit `text` as a user turn and wait for the reply.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Some(request) = self.begin(text) else {
            return SubmitOutcome::Ignored;
        };
        let result = self.transport.send(&request).await;
        self.settle(result)
    }

    /// Submit whatever is currently in the input field.
    pub async fn submit_input(&mut self) -> SubmitOutcome {
        let text = self.input.clone();
        self.submit(&text).await
    }

    /// Probe the relay when the `status_check` capability is enabled.
    pub async fn check_status(&mut self) -> Option<bool> {
        if !self.capabilities.status_check {
            return None;
        }
        let online = match self.transport.health().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!("Relay status check failed: {e}");
                false
            }
        };
        info!("relay online: {online}");
        self.relay_online = Some(online);
        Some(online)
    }
}
