//! Notification sinks for rate-change summaries.
//!
//! A sink posts a text message, optionally as a reply to an earlier post, and
//! hands back a handle to what it posted. Delivery concerns (auth, transport,
//! failures) belong to the sink; callers only decide what to post and when.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub mod webhook;

pub use webhook::WebhookSink;

/// Opaque id of a posted message, as returned by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostHandle(pub String);

impl fmt::Display for PostHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait NotificationSink {
    fn post(&mut self, text: &str, reply_to: Option<&PostHandle>) -> Result<PostHandle, AppError>;
}

/// Prints posts to stdout instead of sending them (used for `--dry-run`).
#[derive(Debug, Default)]
pub struct StdoutSink {
    posted: usize,
}

impl NotificationSink for StdoutSink {
    fn post(&mut self, text: &str, reply_to: Option<&PostHandle>) -> Result<PostHandle, AppError> {
        self.posted += 1;
        let handle = PostHandle(format!("dry-run-{}", self.posted));
        match reply_to {
            Some(parent) => println!("--- {handle} (reply to {parent}) ---"),
            None => println!("--- {handle} ---"),
        }
        println!("{text}");
        Ok(handle)
    }
}
