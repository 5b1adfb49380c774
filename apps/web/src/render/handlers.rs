//! Axum route handlers for the rendered letter.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::letter::{export_filename, LetterComposition, LetterView};
use crate::render::pdf::export_pdf;
use crate::state::AppState;
use crate::wizard::controller::{WizardError, WizardSession};

/// A rendered PDF ready to be offered for download.
#[derive(Debug)]
pub struct ExportedLetter {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl IntoResponse for ExportedLetter {
    fn into_response(self) -> Response {
        let disposition = format!(
            "attachment; filename=\"{}\"",
            header_safe_filename(&self.filename)
        );
        let disposition = HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

        (
            [
                (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Renders the session's letter to PDF. Fails with `NothingToExport` before a result exists.
pub async fn export_session(state: &AppState, id: Uuid) -> Result<ExportedLetter, AppError> {
    let session = state.sessions.get(id).await?;
    let letter = composition(&session, today())?;
    let filename = export_filename(session.form());

    // PDF assembly is CPU-bound; keep it off the async executor.
    let bytes = tokio::task::spawn_blocking(move || export_pdf(&letter))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!("Exported {} ({} bytes) for session {id}", filename, bytes.len());
    Ok(ExportedLetter { filename, bytes })
}

fn composition(session: &WizardSession, date: NaiveDate) -> Result<LetterComposition, WizardError> {
    let body = session.result().ok_or(WizardError::NothingToExport)?;
    Ok(LetterComposition::compose(session.form(), body, date))
}

/// Quotes and backslashes would end the quoted header value; non-ASCII is not
/// allowed in it at all.
fn header_safe_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}

/// GET /api/v1/sessions/:id/letter
///
/// Returns the result in the session's current view mode.
pub async fn handle_get_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterView>, AppError> {
    let session = state.sessions.get(id).await?;
    let body = session.result().ok_or(WizardError::NothingToExport)?;
    Ok(Json(LetterView::for_mode(
        session.view_mode(),
        session.form(),
        body,
        today(),
    )))
}

/// GET /api/v1/sessions/:id/export
/// GET /letters/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ExportedLetter, AppError> {
    export_session(&state, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe_filename() {
        assert_eq!(
            header_safe_filename("Cover_Letter_Acme \"Labs\"_Ingénieur.pdf"),
            "Cover_Letter_Acme _Labs__Ing_nieur.pdf"
        );
        assert_eq!(
            header_safe_filename("Cover_Letter_Acme_Engineer.pdf"),
            "Cover_Letter_Acme_Engineer.pdf"
        );
    }

    #[test]
    fn test_composition_requires_result() {
        let session = WizardSession::new(Uuid::new_v4());
        assert_eq!(
            composition(&session, today()),
            Err(WizardError::NothingToExport)
        );
    }
}
