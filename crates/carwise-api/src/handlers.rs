//! Route handler functions for all API endpoints.
//!
//! Each handler extracts its input via axum extractors, works against the
//! shared conversation store and returns JSON.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use carwise_chat::{ChatExchange, ConversationTurn, SessionId, SessionSummary};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Session to answer in; the active session when omitted.
    pub session_id: Option<SessionId>,
}

/// Request body for PUT /sessions/active.
#[derive(Debug, Deserialize)]
pub struct SwitchSessionRequest {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub vehicles: usize,
    pub maintenance_schedules: usize,
    pub sessions: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub active: Option<SessionId>,
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TurnsResponse {
    pub session_id: SessionId,
    pub turns: Vec<ConversationTurn>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - health check.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let knowledge = state.orchestrator.dispatcher().knowledge();
    let sessions = state.lock_store()?.len();
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        vehicles: knowledge.vehicles().len(),
        maintenance_schedules: knowledge.maintenance().len(),
        sessions,
    }))
}

/// POST /chat - answer a message and record the exchange.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatExchange>, ApiError> {
    let mut store = state.lock_store()?;
    let exchange = match body.session_id {
        Some(ref id) => state
            .orchestrator
            .handle_message_in(&mut store, id, &body.message)?,
        None => state.orchestrator.handle_message(&mut store, &body.message)?,
    };
    Ok(Json(exchange))
}

/// GET /sessions - list sessions and the active one.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<SessionsResponse>, ApiError> {
    let store = state.lock_store()?;
    Ok(Json(SessionsResponse {
        active: store.active_session().cloned(),
        sessions: store.summaries(),
    }))
}

/// POST /sessions - start a new chat and make it active.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedSession>), ApiError> {
    let session_id = state.lock_store()?.new_session();
    Ok((StatusCode::CREATED, Json(CreatedSession { session_id })))
}

/// PUT /sessions/active - switch the active chat.
pub async fn switch_session(
    State(state): State<AppState>,
    Json(body): Json<SwitchSessionRequest>,
) -> Result<Json<SessionsResponse>, ApiError> {
    let mut store = state.lock_store()?;
    store.switch_session(&body.session_id)?;
    Ok(Json(SessionsResponse {
        active: store.active_session().cloned(),
        sessions: store.summaries(),
    }))
}

/// POST /sessions/{id}/clear - drop a chat's history, keeping the chat.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnsResponse>, ApiError> {
    let session_id = SessionId::new(id);
    let mut store = state.lock_store()?;
    store.clear_session(&session_id)?;
    Ok(Json(TurnsResponse {
        session_id,
        turns: Vec::new(),
    }))
}

/// GET /sessions/{id}/turns - a chat's history in order.
pub async fn session_turns(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TurnsResponse>, ApiError> {
    let session_id = SessionId::new(id);
    let store = state.lock_store()?;
    let turns = store.list_turns(&session_id)?.to_vec();
    Ok(Json(TurnsResponse { session_id, turns }))
}
