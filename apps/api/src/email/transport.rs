//! Email transport: the single point of exit for outbound email.
//!
//! `HttpEmailTransport` posts to a transactional-email HTTP API. All sends go
//! through `MailQueue`, which paces them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Email API still failing after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Mail queue is closed")]
    QueueClosed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivers one email. Implement this to swap providers or to fake delivery in tests.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError>;
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpEmailTransport {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailTransport {
    pub fn new(api_url: String, api_key: String, from: String) -> Result<Self, EmailError> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(30)).build()?,
            api_url,
            api_key,
            from,
        })
    }

    fn request_body<'a>(&'a self, email: &'a OutboundEmail) -> SendRequest<'a> {
        SendRequest {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    /// Retries on 429 and 5xx with exponential backoff.
    async fn send(&self, email: &OutboundEmail) -> Result<(), EmailError> {
        let body = self.request_body(email);
        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Email to {} attempt {} failed, retrying after {}ms...",
                    email.to,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                last_error = format!("status {}: {message}", status.as_u16());
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&text)
                    .map(|e| e.message)
                    .unwrap_or(text);
                return Err(EmailError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!("Email delivered to {}", email.to);
            return Ok(());
        }

        Err(EmailError::RetriesExhausted {
            attempts: MAX_RETRIES,
            last_error,
        })
    }
}
