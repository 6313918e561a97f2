//! Completion request/response types for Pathwise.
//!
//! These types model the data shapes for the text-completion service:
//! conversation messages, requests, responses, and error handling.
//! They are provider-agnostic; wire formats live in pathwise-infra.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of a message in a conversation.
///
/// `System` exists for the completion wire format only and is never
/// persisted -- the store's CHECK constraint allows `user`/`assistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a completion conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Request to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    /// Full prior transcript, oldest first.
    pub messages: Vec<Message>,
    /// Fixed, non-user-editable system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from the completion service. Exactly one text turn per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

/// Errors from the completion service adapter.
///
/// `NotConfigured` maps to the user-facing `ServiceUnavailable`;
/// everything else is an upstream failure. The adapter never retries --
/// retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion service is not configured (missing credential)")]
    NotConfigured,

    #[error("upstream error: {message}")]
    Upstream { message: String },

    #[error("completion request timed out")]
    Timeout,

    #[error("rate limited by completion service")]
    RateLimited,

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
