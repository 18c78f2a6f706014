//! Messaging API client for sending replies.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::types::{ApiErrorBody, ReplyMessage, ReplyRequest};

/// Failure to deliver a reply.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Messaging API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
}

/// Something that can answer a webhook event through its reply token.
pub trait Replier {
    fn reply(
        &self,
        reply_token: &str,
        messages: &[ReplyMessage],
    ) -> impl Future<Output = Result<(), ReplyError>> + Send;
}

/// Messaging API client.
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl LineClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ReplyError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            access_token: access_token.into(),
            base_url: base_url.into(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a reply message.
    #[instrument(skip_all)]
    pub async fn reply_message(
        &self,
        reply_token: &str,
        messages: &[ReplyMessage],
    ) -> Result<(), ReplyError> {
        let request = ReplyRequest {
            reply_token,
            messages,
        };

        let response = self
            .client
            .post(self.api_url("/v2/bot/message/reply"))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(
                status_code = status.as_u16(),
                message_count = messages.len(),
                "line_reply_sent"
            );
            return Ok(());
        }

        // The error body is informational only; fall back to the raw text.
        let raw = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&raw)
            .ok()
            .map(|body| body.message)
            .filter(|m| !m.is_empty())
            .unwrap_or(raw);

        warn!(
            status_code = status.as_u16(),
            error = %message,
            "line_reply_rejected"
        );

        Err(ReplyError::Api { status, message })
    }
}

impl Replier for LineClient {
    fn reply(
        &self,
        reply_token: &str,
        messages: &[ReplyMessage],
    ) -> impl Future<Output = Result<(), ReplyError>> + Send {
        self.reply_message(reply_token, messages)
    }
}
