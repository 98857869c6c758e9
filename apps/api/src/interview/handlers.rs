//! Axum route handlers for the interview API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::engine::{
    apply_turn, closing_summary, components_status, opening_message, ComponentsStatus,
};
use crate::interview::phase::Phase;
use crate::interview::strategy::FollowUpStrategy;
use crate::state::AppState;
use crate::synthesis::preview::ResumePreview;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    pub session_type: String,
    pub target_role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    pub phase: Phase,
    pub message: String,
    pub progress_percentage: u32,
}

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    pub user_input: String,
}

#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub message: String,
    pub phase: Phase,
    pub progress_percentage: u32,
    pub follow_up_strategy: FollowUpStrategy,
    pub components_status: ComponentsStatus,
}

#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub final_progress: u32,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Creates a session and returns the assistant's opening message.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<StartSessionResponse>, AppError> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }

    let (session_id, handle) = state
        .store
        .create(request.user_id, request.session_type, request.target_role)
        .await;

    let mut session = handle.lock().await;
    let message = opening_message(&mut session);
    info!(%session_id, "session started");

    Ok(Json(StartSessionResponse {
        session_id,
        phase: session.phase,
        message,
        progress_percentage: session.phase.progress_percentage(),
    }))
}

/// POST /api/v1/sessions/:id/turns
///
/// Applies one user turn. A turn already in flight for the same session
/// yields SESSION_BUSY rather than interleaved processing.
pub async fn handle_submit_turn(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let handle = state.store.get(session_id).await?;
    let mut session = handle
        .try_lock()
        .map_err(|_| AppError::SessionBusy(session_id))?;

    let outcome = apply_turn(&mut session, &request.user_input)?;
    let components_status = components_status(&session);

    Ok(Json(TurnResponse {
        message: outcome.message,
        phase: outcome.phase,
        progress_percentage: outcome.progress_percentage,
        follow_up_strategy: outcome.follow_up_strategy,
        components_status,
    }))
}

/// GET /api/v1/sessions/:id/preview
///
/// Recomputes the résumé preview from accumulated state. A young session
/// returns empty experiences and zero scores — never an error.
pub async fn handle_fetch_preview(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ResumePreview>, AppError> {
    let handle = state.store.get(session_id).await?;
    let session = handle.lock().await;
    let preview = state
        .synthesizer
        .synthesize(&session.profile, &session.intelligence, &session.personality)
        .await?;
    Ok(Json(preview))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends the session. Removal happens first so no further turns are accepted;
/// the retained handle keeps the profile alive for the final summary.
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<EndSessionResponse>, AppError> {
    let handle = state.store.remove(session_id).await?;
    // An in-flight turn still holds the lock; wait for it to finish.
    let session = handle.lock().await;
    let response = EndSessionResponse {
        final_progress: session.phase.progress_percentage(),
        summary: closing_summary(&session),
    };
    info!(%session_id, final_progress = response.final_progress, "session ended");
    Ok(Json(response))
}
