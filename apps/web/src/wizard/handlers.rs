//! Axum route handlers for the Wizard API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::wizard::controller::{SessionSnapshot, StepChange};
use crate::wizard::submission::{spawn_submission, SubmissionOutcome};
use crate::wizard::types::Field;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EditFieldRequest {
    pub field: Field,
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let session = state.sessions.create().await;
    info!("Created wizard session {}", session.id());
    (StatusCode::CREATED, Json(session.snapshot()))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(state.sessions.get(id).await?.snapshot()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/fields
///
/// Updates one field. Clears that field's validation error, if any.
pub async fn handle_edit_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EditFieldRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| {
            s.edit_field(request.field, request.value);
            s.snapshot()
        })
        .await?;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/next
///
/// A blocked advance is not an error: the snapshot carries the field error.
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| {
            s.next().map(|change| {
                if let StepChange::Blocked { field } = change {
                    info!("Session {id}: step {} blocked on {field}", s.step().number());
                }
                s.snapshot()
            })
        })
        .await??;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/previous
pub async fn handle_previous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| s.previous().map(|_| s.snapshot()))
        .await??;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/submit
///
/// Sends the form to the webhook and waits for the letter.
/// 502 when the webhook fails; 409 when the session moved on meanwhile.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    match spawn_submission(state.sessions.clone(), state.submitter.clone(), id).await? {
        SubmissionOutcome::Delivered => Ok(Json(state.sessions.get(id).await?.snapshot())),
        SubmissionOutcome::Failed(e) => Err(AppError::SubmissionFailed(e)),
        SubmissionOutcome::Superseded => Err(AppError::SubmissionSuperseded),
    }
}

/// POST /api/v1/sessions/:id/close
pub async fn handle_close_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| s.close_result().map(|_| s.snapshot()))
        .await??;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/toggle-view
pub async fn handle_toggle_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| s.toggle_view().map(|_| s.snapshot()))
        .await??;
    Ok(Json(snapshot))
}

/// POST /api/v1/sessions/:id/new-letter
pub async fn handle_new_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let snapshot = state
        .sessions
        .with_session(id, |s| s.new_letter().map(|_| s.snapshot()))
        .await??;
    Ok(Json(snapshot))
}
