//! Session title derivation.
//!
//! Titles come from two places: the first message of a draft (first few
//! whitespace tokens) or, for sessions created directly without a seed
//! message, a timestamp-based default.

use chrono::{DateTime, Utc};

/// Token budget used when promoting a draft from its first message.
pub const TITLE_TOKEN_BUDGET: usize = 4;

/// Fallback title for empty or whitespace-only content.
pub const FALLBACK_TITLE: &str = "New Chat";

/// Derive a human-readable session title from message content.
///
/// Splits on whitespace, takes the first `max_tokens` tokens, and joins
/// them with single spaces. Total for any string input: empty or
/// whitespace-only content yields [`FALLBACK_TITLE`], and content with
/// no whitespace passes through whole when under the budget.
pub fn derive_title(content: &str, max_tokens: usize) -> String {
    let title = content
        .split_whitespace()
        .take(max_tokens)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title
    }
}

/// Timestamp-based default title for sessions created without a seed
/// message, e.g. `Chat Session Sep 01, 14:32`.
pub fn timestamp_title(now: DateTime<Utc>) -> String {
    format!("Chat Session {}", now.format("%b %d, %H:%M"))
}
