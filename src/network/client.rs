use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::common::Message;
use crate::error::ChatError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

/// HTTP client for the chat endpoint. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one message and return the assistant's reply text.
    pub async fn request_reply(&self, text: &str) -> Result<String, ChatError> {
        log::info!("Sending chat request to {} at {}", self.endpoint, Utc::now().to_rfc3339());

        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest { message: text })
            .send()
            .await?;

        let status = response.status();
        log::info!("Received response status {status}");
        if !status.is_success() {
            return Err(ChatError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let decoded: ChatResponse = serde_json::from_slice(&body)?;
        log::info!("Received chat reply at {}", Utc::now().to_rfc3339());
        Ok(decoded.response)
    }

    /// Run one exchange and always produce an assistant-side message: the
    /// reply on success, a readable error otherwise.
    pub async fn exchange(&self, text: &str) -> Message {
        match self.request_reply(text).await {
            Ok(reply) => Message::assistant(reply),
            Err(err) => {
                log::error!("Chat request failed: {err}");
                Message::assistant(error_reply(&err.to_string()))
            }
        }
    }
}

/// User-facing text for a failed exchange.
pub fn error_reply(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        "Sorry, an error occurred: unknown error".to_string()
    } else {
        format!("Sorry, an error occurred: {detail}")
    }
}
