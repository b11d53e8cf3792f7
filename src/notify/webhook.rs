//! HTTP webhook sink.
//!
//! Posts `{"text": ..., "reply_to": ...}` as JSON and expects `{"id": ...}` back.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, EXIT_CONFIG, EXIT_NOTIFY};
use crate::notify::{NotificationSink, PostHandle};

pub struct WebhookSink {
    client: Client,
    url: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a PostHandle>,
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    id: PostHandle,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self, AppError> {
        let url = url.into();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::new(
                EXIT_CONFIG,
                format!("Webhook URL must be http(s), got '{url}'."),
            ));
        }
        Ok(Self {
            client: Client::new(),
            url,
            token,
        })
    }
}

impl NotificationSink for WebhookSink {
    fn post(&mut self, text: &str, reply_to: Option<&PostHandle>) -> Result<PostHandle, AppError> {
        let mut req = self
            .client
            .post(&self.url)
            .json(&PostRequest { text, reply_to });
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .map_err(|e| AppError::new(EXIT_NOTIFY, format!("Webhook request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                EXIT_NOTIFY,
                format!("Webhook request failed with status {}.", resp.status()),
            ));
        }

        let body: PostResponse = resp
            .json()
            .map_err(|e| AppError::new(EXIT_NOTIFY, format!("Failed to parse webhook response: {e}")))?;

        Ok(body.id)
    }
}
