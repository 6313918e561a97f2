//! Chat session and message types for Pathwise.
//!
//! These types model conversations between a user and the counselor:
//! sessions (one per conversation) and the ordered turns within them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

// Re-export MessageRole from the llm module (it's used in both chat and
// completion contexts).
pub use crate::llm::MessageRole;

/// A conversation session owned by a single user.
///
/// A session does not exist in the store until its first turn is sent;
/// before that the client keeps a local draft. `updated_at` is bumped
/// whenever a message lands, so session lists order by recency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    /// Stable user identifier supplied by the external identity provider.
    pub owner_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single turn within a chat session.
///
/// Turns are totally ordered by `created_at` within a session; UUID v7
/// ids break ties by insertion order. A user turn with no following
/// assistant turn is an incomplete exchange and is permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A turn shown optimistically before the server has confirmed it.
///
/// Constructed by the client at submission time with a client-local id.
/// Never persisted: it is discarded once the authoritative transcript has
/// been refetched, or immediately on failure. Scoped to the session it
/// was created for -- it must never survive a session switch.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    /// Client-generated temporary identifier (never a store id).
    pub local_id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl PendingTurn {
    /// Construct a pending user turn for a session, stamped with `now`.
    pub fn new(session_id: Uuid, content: String) -> Self {
        Self {
            local_id: Uuid::now_v7(),
            session_id,
            content,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.id)
    }
}
