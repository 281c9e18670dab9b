//! # Chat Routes
//!
//! The WhatsApp simulation: the customer side posts a message, the scripted
//! bot answers after a simulated typing delay.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use deliverypro_core::chat::{scripted_reply, ChatMessage};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/chat/messages`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
}

/// Response: the stored customer message and the bot's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub message: ChatMessage,
    pub reply: ChatMessage,
}

/// `GET /api/chat/messages` - the whole conversation, oldest first.
pub async fn list(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    debug!("chat list");
    Json(state.chat().all())
}

/// `POST /api/chat/messages` - one customer message and its scripted reply.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatExchange>, ApiError> {
    if request.content.trim().is_empty() {
        return Err(ApiError::validation("Message content is required"));
    }

    debug!(chars = request.content.len(), "chat message received");

    let message = ChatMessage::customer(request.content.trim());
    state.chat().push(message.clone());

    // Simulated typing delay; the log is not locked while we wait.
    let delay = state.config().chat_reply_delay_ms;
    tokio::time::sleep(std::time::Duration::from_millis(delay)).await;

    let reply = ChatMessage::bot(scripted_reply(&message.content));
    state.chat().push(reply.clone());

    Ok(Json(ChatExchange { message, reply }))
}
