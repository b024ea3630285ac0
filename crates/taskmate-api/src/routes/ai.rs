use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use taskmate_chat::TurnRequest;
use taskmate_llm::Message;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageRequest {
    pub user_id: String,
    pub message: String,
    #[serde(default)]
    pub active_todos: Vec<String>,
    #[serde(default)]
    pub completed_todos: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub parts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Send a chat message to the assistant
///
/// Always answers 200; when the assistant is unreachable the reply is the
/// configured fallback message.
#[utoipa::path(
    post,
    path = "/ai/send_message",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Reply split into message parts", body = MessageResponse)
    ),
    tag = "ai"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MessageRequest>,
) -> Json<MessageResponse> {
    tracing::info!(user_id = %req.user_id, "Processing AI request");

    let turn = TurnRequest::new(req.user_id, req.message)
        .with_todos(req.active_todos, req.completed_todos);

    let parts = match state.chat.respond(turn).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Error in AI endpoint: {}", e);
            vec![state.config.chat.fallback_message.clone()]
        }
    };

    Json(MessageResponse { parts })
}

/// Conversation history kept for a user
#[utoipa::path(
    get,
    path = "/ai/response_history/{user_id}",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "History turns, oldest first", body = [HistoryEntry])
    ),
    tag = "ai"
)]
pub async fn response_history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<HistoryEntry>> {
    let history = state.chat.store().history(&user_id).await;
    Json(history.iter().map(message_to_entry).collect())
}

fn message_to_entry(message: &Message) -> HistoryEntry {
    HistoryEntry {
        role: message.role().to_string(),
        content: message.content().to_string(),
    }
}
