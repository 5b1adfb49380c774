//! HTML routes. Each POST applies the edited field, runs one action, then
//! redirects back to the page (post/redirect/get).

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use chrono::Local;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::pages::LetterPage;
use crate::state::AppState;
use crate::wizard::submission::{spawn_submission, SubmissionOutcome};
use crate::wizard::types::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageAction {
    Next,
    Previous,
    Submit,
    Close,
    ToggleView,
    NewLetter,
}

/// Body of every form on the page. Only the current step's input is present.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    pub action: PageAction,
    pub name: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "additionalInfo")]
    pub additional_info: Option<String>,
}

impl PageForm {
    fn edits(&self) -> impl Iterator<Item = (Field, &String)> {
        [
            (Field::Name, self.name.as_ref()),
            (Field::Company, self.company.as_ref()),
            (Field::Role, self.role.as_ref()),
            (Field::AdditionalInfo, self.additional_info.as_ref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

fn page_url(id: Uuid) -> String {
    format!("/letters/{id}")
}

/// GET /
///
/// Starts a new wizard session.
pub async fn handle_index(State(state): State<AppState>) -> Redirect {
    let session = state.sessions.create().await;
    info!("Created wizard session {}", session.id());
    Redirect::to(&page_url(session.id()))
}

/// GET /letters/:id
pub async fn handle_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let today = Local::now().date_naive();
    let page = state
        .sessions
        .with_session(id, |s| {
            let notice = s.take_notice();
            LetterPage::from_session(s, notice, today)
        })
        .await?;

    let html = page
        .render()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("page template failed: {e}")))?;
    Ok(Html(html))
}

/// POST /letters/:id
pub async fn handle_page_action(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<PageForm>,
) -> Result<Redirect, AppError> {
    let action = form.action;
    let result = state
        .sessions
        .with_session(id, |s| {
            for (field, value) in form.edits() {
                s.edit_field(field, value.clone());
            }
            match action {
                PageAction::Next => s.next().map(|_| ()),
                PageAction::Previous => s.previous().map(|_| ()),
                PageAction::Close => s.close_result(),
                PageAction::ToggleView => s.toggle_view().map(|_| ()),
                PageAction::NewLetter => s.new_letter(),
                PageAction::Submit => Ok(()),
            }
        })
        .await?;

    if let Err(e) = result {
        // Disabled controls can still be posted by a stale page; the page re-renders the real state.
        warn!("Session {id}: ignoring {action:?}: {e}");
        return Ok(Redirect::to(&page_url(id)));
    }

    if action == PageAction::Submit {
        match spawn_submission(state.sessions.clone(), state.submitter.clone(), id).await {
            Ok(SubmissionOutcome::Failed(e)) => warn!("Session {id}: submission failed: {e}"),
            Ok(_) => {}
            Err(AppError::Wizard(e)) => {
                warn!("Session {id}: ignoring submit: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(Redirect::to(&page_url(id)))
}
