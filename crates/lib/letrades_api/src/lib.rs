//! # letrades_api
//!
//! HTTP relay API for letrades: a liveness probe and a single chat endpoint
//! that forwards each message to the completion API.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use letrades_core::completion::{CompletionApi, CompletionError};
use letrades_core::completion::anthropic::AnthropicClient;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ApiConfig;
use crate::handlers::{chat, health};

/// Shared application state passed to all handlers.
///
/// Holds only immutable data; handlers never share mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration.
    pub config: Arc<ApiConfig>,
    /// Outbound completion client.
    pub completion: Arc<dyn CompletionApi>,
}

impl AppState {
    /// Build state with the Anthropic client described by `config`.
    pub fn new(config: ApiConfig) -> Result<Self, CompletionError> {
        let client = AnthropicClient::new(&config.anthropic_base_url, config.upstream_timeout)?;
        Ok(Self::with_completion(config, Arc::new(client)))
    }

    /// Build state around an arbitrary completion client.
    pub fn with_completion(config: ApiConfig, completion: Arc<dyn CompletionApi>) -> Self {
        Self {
            config: Arc::new(config),
            completion,
        }
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_API_CHAT, post(chat::chat_handler))
        .layer(cors)
        .with_state(state)
}
