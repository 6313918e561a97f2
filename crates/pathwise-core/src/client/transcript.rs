//! Merging the authoritative transcript with the optimistic overlay.
//!
//! The merge is a pure, order-preserving function rather than an
//! in-place mutation of a shared list, so the reconciliation rules are
//! directly testable: authoritative rows keep their order, pending
//! turns are appended after them in submission order, and nothing is
//! deduplicated here -- the pipeline discards pending turns once the
//! authoritative transcript has been refetched.

use chrono::{DateTime, Utc};
use pathwise_types::chat::{ChatMessage, MessageRole, PendingTurn};
use uuid::Uuid;

/// One entry of the merged, UI-visible transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// True for optimistic entries not yet confirmed by the store.
    pub pending: bool,
}

impl TranscriptEntry {
    fn confirmed(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            role: message.role,
            content: message.content.clone(),
            created_at: message.created_at,
            pending: false,
        }
    }

    fn optimistic(turn: &PendingTurn) -> Self {
        Self {
            id: turn.local_id,
            role: MessageRole::User,
            content: turn.content.clone(),
            created_at: turn.created_at,
            pending: true,
        }
    }
}

/// Merge the authoritative transcript with the pending overlay.
pub fn merge_transcript(
    authoritative: &[ChatMessage],
    pending: &[PendingTurn],
) -> Vec<TranscriptEntry> {
    authoritative
        .iter()
        .map(TranscriptEntry::confirmed)
        .chain(pending.iter().map(TranscriptEntry::optimistic))
        .collect()
}
