//! Chat relay handler.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use letrades_core::message::{ChatReply, RelayRequest};
use letrades_core::relay;
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;

/// `POST /api/chat` — forward one user message upstream and return the reply.
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> AppResult<Json<ChatReply>> {
    let Json(request) = payload?;
    debug!(
        input_len = request.user_input.len(),
        businesses = request.businesses.len(),
        "chat request received"
    );

    let settings = state.config.relay_settings();
    let text = relay::relay(&settings, state.completion.as_ref(), &request).await?;

    Ok(Json(ChatReply { text }))
}
