use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::RenderError;
use crate::webhook_client::SubmissionError;
use crate::wizard::controller::WizardError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Submission failed: {0}")]
    SubmissionFailed(#[from] SubmissionError),

    #[error("Submission superseded")]
    SubmissionSuperseded,

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Wizard(WizardError::Busy) => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_PROGRESS",
                WizardError::Busy.to_string(),
            ),
            AppError::Wizard(WizardError::NothingToExport) => (
                StatusCode::CONFLICT,
                "NO_RESULT",
                WizardError::NothingToExport.to_string(),
            ),
            AppError::Wizard(e @ WizardError::InvalidAction(_)) => {
                (StatusCode::CONFLICT, "INVALID_ACTION", e.to_string())
            }
            AppError::SubmissionFailed(e) => {
                tracing::warn!("Submission failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SUBMISSION_FAILED",
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
            AppError::SubmissionSuperseded => (
                StatusCode::CONFLICT,
                "SUBMISSION_SUPERSEDED",
                "The session moved on before the cover letter arrived".to_string(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "The document could not be rendered".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
