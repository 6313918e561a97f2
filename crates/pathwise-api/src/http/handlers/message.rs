//! Message HTTP handlers: transcript reads and the send procedure.
//!
//! Endpoints:
//! - GET  /api/v1/sessions/{id}/messages - Ordered transcript
//! - POST /api/v1/sessions/{id}/messages - Send a turn, returns both turns

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use pathwise_types::chat::ChatMessage;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::http::handlers::session::owned_session;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for sending a message.
#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

/// Both persisted turns of a completed exchange.
#[derive(Debug, Serialize)]
pub struct TurnExchange {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/sessions/{id}/messages - Get the ordered transcript.
pub async fn get_messages(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ChatMessage>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    owned_session(&state, &identity, &sid).await?;
    let messages = state.chat_service.get_messages(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(messages, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/messages - Run one turn exchange.
///
/// Persists the user turn, calls the completion service with the full
/// transcript, persists the assistant turn, and returns both. On a
/// completion failure the user turn stays persisted and the error maps
/// to 502/503; clients refetch the transcript to see the orphan.
pub async fn send_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<ApiResponse<TurnExchange>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    owned_session(&state, &identity, &sid).await?;

    let (user_message, assistant_message) =
        state.chat_service.send_turn(&sid, &body.content).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let exchange = TurnExchange {
        user_message,
        assistant_message,
    };
    let resp = ApiResponse::success(exchange, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}/messages"))
        .with_link("session", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}
