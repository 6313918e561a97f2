//! CompletionProvider trait definition.
//!
//! The abstraction over the external text-generation service. Uses
//! native async fn in traits (RPITIT); implementations live in
//! pathwise-infra (e.g., `GeminiProvider`).
//!
//! Non-streaming: one text turn per call, no internal retries.
//! Timeouts are the implementation's responsibility and surface as
//! `LlmError::Timeout`.

use pathwise_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion service backends.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
