use std::sync::Arc;

use crate::config::Config;
use crate::webhook_client::SubmissionClient;
use crate::wizard::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable generator client. Default: WebhookClient against `config.webhook_url`.
    pub submitter: Arc<dyn SubmissionClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, submitter: Arc<dyn SubmissionClient>) -> Self {
        Self {
            sessions: SessionStore::new(config.session_idle_minutes),
            submitter,
            config,
        }
    }
}
