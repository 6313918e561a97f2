//! Stub provider wired when no API key is configured.
//!
//! Sessions can still be created, listed, renamed, and deleted; only
//! `complete` fails, with `LlmError::NotConfigured`, which the service
//! layer surfaces as service-unavailable.

use pathwise_core::llm::provider::CompletionProvider;
use pathwise_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Provider used when `GEMINI_API_KEY` is absent.
pub struct UnconfiguredProvider;

impl CompletionProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "unconfigured"
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_always_fails() {
        let provider = UnconfiguredProvider;
        assert_eq!(provider.name(), "unconfigured");

        let request = CompletionRequest {
            model: "gemini-1.5-flash".to_string(),
            messages: vec![],
            system: None,
            max_tokens: 16,
            temperature: None,
        };
        let err = provider.complete(&request).await.unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }
}
