//! Fixed counselor persona and completion request building.
//!
//! The system instruction is not user-editable; it travels with every
//! completion call alongside the full prior transcript, oldest first.

use pathwise_types::chat::ChatMessage;
use pathwise_types::llm::{CompletionRequest, Message};

/// Default completion model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Output cap for a single assistant turn.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// System instruction describing the assistant's persona and domain.
pub const COUNSELOR_SYSTEM_PROMPT: &str = "\
You are a professional career counselor AI assistant. You provide helpful, \
empathetic, and actionable career guidance.

Key areas you help with:
- Career planning and goal setting
- Job search strategies and techniques
- Resume and interview preparation
- Skill development recommendations
- Professional networking advice
- Career transitions and pivots
- Work-life balance guidance
- Industry insights and trends

Always be supportive, professional, and provide specific, actionable advice. \
Ask clarifying questions when needed to give more personalized guidance.";

/// Build a [`CompletionRequest`] from a session's ordered transcript.
///
/// The transcript must already include the user turn being answered;
/// `send_turn` reads it back from the store after persisting.
pub fn build_completion_request(history: &[ChatMessage], model: &str) -> CompletionRequest {
    let messages = history
        .iter()
        .map(|m| Message {
            role: m.role,
            content: m.content.clone(),
        })
        .collect();

    CompletionRequest {
        model: model.to_string(),
        messages,
        system: Some(COUNSELOR_SYSTEM_PROMPT.to_string()),
        max_tokens: DEFAULT_MAX_TOKENS,
        temperature: Some(0.7),
    }
}
