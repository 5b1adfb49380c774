//! In-process `SubmissionClient` doubles for handler and flow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::webhook_client::{normalize_response, LetterContent, SubmissionClient, SubmissionError};
use crate::wizard::types::FormData;

/// Answers every submission like a webhook that returned `body` with `status`.
pub struct StubClient {
    status: u16,
    body: String,
    calls: AtomicUsize,
}

impl StubClient {
    pub fn replying(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubmissionClient for StubClient {
    async fn submit(&self, _form: &FormData) -> Result<LetterContent, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if (200..300).contains(&self.status) {
            Ok(normalize_response(&self.body))
        } else {
            Err(SubmissionError::Status {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }
}

/// Holds each submission until `release` is called, then echoes the company.
#[derive(Default)]
pub struct GatedClient {
    gate: Arc<Notify>,
}

impl GatedClient {
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl SubmissionClient for GatedClient {
    async fn submit(&self, form: &FormData) -> Result<LetterContent, SubmissionError> {
        self.gate.notified().await;
        Ok(LetterContent::RawText {
            text: format!("Dear {}", form.company),
        })
    }
}
