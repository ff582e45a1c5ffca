//! Chat endpoint: `POST /api/chatbot/message`.
//!
//! The request carries the already-classified intent plus the raw message;
//! the handler forwards the caller's bearer token to the backend and always
//! answers 200 with a JSON reply envelope.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use souq_agent::{BackendApi, IntentResolver};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct ChatState {
    pub resolver: Arc<IntentResolver>,
    pub backend: Arc<dyn BackendApi>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub intent: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// False when the intent fell outside the known set and the reply is
    /// empty, so callers can substitute their own generic answer.
    pub resolved: bool,
}

pub fn router(state: ChatState) -> Router {
    Router::new().route("/api/chatbot/message", post(message)).with_state(state)
}

pub async fn message(
    State(state): State<ChatState>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let correlation_id = Uuid::new_v4().to_string();
    let token = bearer_token(&headers);

    info!(
        event_name = "chatbot.message.received",
        correlation_id = %correlation_id,
        intent = %request.intent,
        authenticated = token.is_some(),
        "resolving chat message"
    );

    let reply = state.resolver.resolve(&request.intent, &request.message, token).await;
    let resolved = !reply.is_empty();

    info!(
        event_name = "chatbot.message.resolved",
        correlation_id = %correlation_id,
        intent = %request.intent,
        resolved,
        "chat message resolved"
    );

    Json(ChatReply { reply, resolved })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}
