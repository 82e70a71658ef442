//! Route handler functions for all API endpoints.
//!
//! Handlers extract path and body parameters via axum extractors, delegate
//! to the chat orchestrator, and return JSON responses.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aide_chat::{CredentialUpdate, SessionSummary, TranscriptUpdate};
use aide_core::{CredentialStatus, Persona, Turn};

use crate::assets::INDEX_HTML;
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

/// Body of `PUT`/`PATCH /sessions/{id}/persona`.
#[derive(Debug, Deserialize)]
pub struct PersonaRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /sessions/{id}/messages`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsResponse {
    pub credentials: CredentialStatus,
    #[serde(default)]
    pub warnings: Vec<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.chat.session_count(),
    })
}

/// GET / and GET /ui - serve the setup and chat page.
pub async fn ui() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// POST /sessions - start a session in the setup state.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSummary>), ApiError> {
    let summary = state.chat.create_session()?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// GET /sessions - list sessions, most recently active first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionsResponse>, ApiError> {
    let sessions = state.chat.list_sessions()?;
    let total = sessions.len();
    Ok(Json(SessionsResponse { sessions, total }))
}

/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(state.chat.get_session(id)?))
}

/// DELETE /sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.chat.delete_session(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /sessions/{id}/persona - complete setup with a persona.
pub async fn configure_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PersonaRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(state.chat.configure(id, &body.name, &body.description)?))
}

/// PATCH /sessions/{id}/persona - swap the persona and clear the transcript.
pub async fn replace_persona(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PersonaRequest>,
) -> Result<Json<SessionSummary>, ApiError> {
    let persona = Persona::new(body.name, body.description);
    Ok(Json(state.chat.reset_persona(id, persona)?))
}

/// POST /sessions/{id}/reset - return to the setup view.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSummary>, ApiError> {
    Ok(Json(state.chat.reset(id)?))
}

/// GET /sessions/{id}/transcript - rendered transcript.
pub async fn transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let turns = state.chat.transcript(id)?;
    Ok(Json(TranscriptResponse {
        session_id: id,
        turns,
    }))
}

/// POST /sessions/{id}/messages - send one user message.
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<TranscriptUpdate>, ApiError> {
    Ok(Json(state.chat.handle_message(id, &body.text).await?))
}

/// GET /sessions/{id}/credentials - which credentials are set.
pub async fn get_credentials(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CredentialsResponse>, ApiError> {
    Ok(Json(CredentialsResponse {
        credentials: state.chat.credential_status(id)?,
        warnings: Vec::new(),
    }))
}

/// PUT /sessions/{id}/credentials - partial credential update.
pub async fn update_credentials(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CredentialUpdate>,
) -> Result<Json<CredentialsResponse>, ApiError> {
    let (credentials, warnings) = state.chat.update_credentials(id, body)?;
    Ok(Json(CredentialsResponse {
        credentials,
        warnings,
    }))
}
