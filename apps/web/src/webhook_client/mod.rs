//! Webhook client. The only place that talks to the remote cover-letter generator.
//!
//! One POST per submission with a JSON body. No retries and no client-side timeout:
//! a hung request keeps the session in its submitting state until the
//! transport itself gives up.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::wizard::types::FormData;

pub mod response;
#[cfg(test)]
pub mod test_support;

pub use response::{normalize_response, LetterContent};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {status}")]
    Status { status: u16, body: String },
}

/// Seam between the wizard and the generator, so handlers can be exercised
/// without a network.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, form: &FormData) -> Result<LetterContent, SubmissionError>;
}

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SubmissionClient for WebhookClient {
    async fn submit(&self, form: &FormData) -> Result<LetterContent, SubmissionError> {
        let response = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .json(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook returned {}: {}", status, body);
            return Err(SubmissionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes);
        let content = normalize_response(&body);

        debug!(
            "Webhook call succeeded: {} bytes, normalized as {}",
            bytes.len(),
            content.kind()
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serves `app` on an ephemeral port and returns its URL.
    async fn spawn_webhook(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/webhook")
    }

    fn jane() -> FormData {
        FormData {
            name: "Jane Doe".to_string(),
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            additional_info: String::new(),
        }
    }

    #[tokio::test]
    async fn test_posts_form_as_json() {
        let app = Router::new().route(
            "/webhook",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "coverLetter": format!("Dear {}, ...", body["company"].as_str().unwrap_or("?")) }))
            }),
        );
        let client = WebhookClient::new(spawn_webhook(app).await);

        let content = client.submit(&jane()).await.unwrap();
        assert_eq!(content.text(), "Dear Acme, ...");
    }

    #[tokio::test]
    async fn test_payload_carries_all_four_fields() {
        let app = Router::new().route(
            "/webhook",
            post(|Json(body): Json<Value>| async move {
                let ok = body
                    == json!({
                        "name": "Jane Doe",
                        "company": "Acme",
                        "role": "Engineer",
                        "additionalInfo": ""
                    });
                Json(json!({ "output": ok.to_string() }))
            }),
        );
        let client = WebhookClient::new(spawn_webhook(app).await);

        assert_eq!(client.submit(&jane()).await.unwrap().text(), "true");
    }

    #[tokio::test]
    async fn test_plain_text_response() {
        let app = Router::new().route("/webhook", post(|| async { "Hello world" }));
        let client = WebhookClient::new(spawn_webhook(app).await);

        let content = client.submit(&jane()).await.unwrap();
        assert_eq!(
            content,
            LetterContent::RawText {
                text: "Hello world".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_empty_json_object_uses_placeholder() {
        let app = Router::new().route("/webhook", post(|| async { Json(json!({})) }));
        let client = WebhookClient::new(spawn_webhook(app).await);

        let content = client.submit(&jane()).await.unwrap();
        assert_eq!(content.text(), response::PENDING_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_server_error_fails_submission() {
        let app = Router::new().route(
            "/webhook",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = WebhookClient::new(spawn_webhook(app).await);

        match client.submit(&jane()).await {
            Err(SubmissionError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_webhook_fails_submission() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = WebhookClient::new(format!("http://{addr}/webhook"));

        assert!(matches!(
            client.submit(&jane()).await,
            Err(SubmissionError::Http(_))
        ));
    }
}
