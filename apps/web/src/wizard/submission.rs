use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::webhook_client::{SubmissionClient, SubmissionError};
use crate::wizard::controller::Completion;
use crate::wizard::store::SessionStore;

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The letter was stored on the session and the result panel opened.
    Delivered,
    /// The webhook call failed; the session is back on the last step, idle.
    Failed(SubmissionError),
    /// The session moved on while the request was in flight; the response was dropped.
    Superseded,
}

/// Runs one submission for session `id`.
///
/// The session lock is held only to take the ticket and to apply the outcome,
/// never across the webhook call.
pub async fn run_submission(
    store: &SessionStore,
    client: &dyn SubmissionClient,
    id: Uuid,
) -> Result<SubmissionOutcome, AppError> {
    let ticket = store.with_session(id, |s| s.begin_submission()).await??;
    info!(
        "Submitting session {} (submission #{})",
        ticket.session_id, ticket.submission_id
    );

    let (outcome, failure) = match client.submit(&ticket.form).await {
        Ok(content) => (Ok(content), None),
        Err(e) => (Err(()), Some(e)),
    };

    let completion = store
        .with_session(id, |s| s.complete_submission(ticket.submission_id, outcome))
        .await?;

    Ok(match (completion, failure) {
        (Completion::Stale, _) => {
            warn!(
                "Discarding stale response for session {} (submission #{})",
                id, ticket.submission_id
            );
            SubmissionOutcome::Superseded
        }
        (Completion::Applied, Some(e)) => SubmissionOutcome::Failed(e),
        (Completion::Applied, None) => SubmissionOutcome::Delivered,
    })
}

/// Runs the submission on its own task and waits for it.
///
/// The caller may be dropped (client disconnect) without cancelling the
/// webhook call, so the session always leaves `Submitting`.
pub async fn spawn_submission(
    store: SessionStore,
    client: Arc<dyn SubmissionClient>,
    id: Uuid,
) -> Result<SubmissionOutcome, AppError> {
    tokio::spawn(async move { run_submission(&store, client.as_ref(), id).await })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("submission task failed: {e}")))?
}
