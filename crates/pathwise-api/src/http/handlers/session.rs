//! Session CRUD HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/sessions      - List the caller's sessions, paginated
//! - POST   /api/v1/sessions      - Create a session (title optional)
//! - GET    /api/v1/sessions/{id} - Get a single session
//! - PUT    /api/v1/sessions/{id} - Rename a session
//! - DELETE /api/v1/sessions/{id} - Delete a session and its messages

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use pathwise_core::chat::title::timestamp_title;
use pathwise_types::chat::ChatSession;
use pathwise_types::error::ChatError;
use pathwise_types::page::Page;
use serde::Deserialize;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for session listing.
#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    20
}

/// Request body for session creation.
#[derive(Debug, Deserialize)]
pub struct CreateSessionBody {
    pub title: Option<String>,
}

/// Request body for session rename.
#[derive(Debug, Deserialize)]
pub struct RenameSessionBody {
    pub title: String,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// Fetch a session, treating other owners' sessions as absent.
pub(super) async fn owned_session(
    state: &AppState,
    identity: &Identity,
    session_id: &Uuid,
) -> Result<ChatSession, AppError> {
    let session = state.chat_service.get_session(session_id).await?;
    if session.owner_id != identity.user_id {
        return Err(ChatError::NotFound.into());
    }
    Ok(session)
}

/// GET /api/v1/sessions - List the caller's sessions by recency.
pub async fn list_sessions(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<ApiResponse<Page<ChatSession>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let page = state
        .chat_service
        .list_sessions(&identity.user_id, query.page, query.page_size)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(page, request_id, elapsed)
        .with_link("self", "/api/v1/sessions");

    Ok(Json(resp))
}

/// POST /api/v1/sessions - Create a session.
///
/// A missing title gets a timestamp default; an explicitly blank one is
/// a 400 from the service's validation.
pub async fn create_session(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<CreateSessionBody>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let title = match body.title {
        Some(title) => title,
        None => timestamp_title(chrono::Utc::now()),
    };
    let session = state
        .chat_service
        .create_session(&identity.user_id, &title)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let self_link = format!("/api/v1/sessions/{}", session.id);
    let messages_link = format!("/api/v1/sessions/{}/messages", session.id);
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &self_link)
        .with_link("messages", &messages_link);

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id} - Get a session by ID.
pub async fn get_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let session = owned_session(&state, &identity, &sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let self_link = format!("/api/v1/sessions/{}", session.id);
    let messages_link = format!("/api/v1/sessions/{}/messages", session.id);
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &self_link)
        .with_link("messages", &messages_link);

    Ok(Json(resp))
}

/// PUT /api/v1/sessions/{id} - Rename a session.
pub async fn rename_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
    Json(body): Json<RenameSessionBody>,
) -> Result<Json<ApiResponse<ChatSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    owned_session(&state, &identity, &sid).await?;
    state.chat_service.rename_session(&sid, &body.title).await?;
    let session = state.chat_service.get_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let self_link = format!("/api/v1/sessions/{}", session.id);
    let resp =
        ApiResponse::success(session, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// DELETE /api/v1/sessions/{id} - Delete a session and its messages.
pub async fn delete_session(
    State(state): State<AppState>,
    identity: Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    owned_session(&state, &identity, &sid).await?;
    state.chat_service.delete_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "session_id": session_id}),
        request_id,
        elapsed,
    );

    Ok(Json(resp))
}
