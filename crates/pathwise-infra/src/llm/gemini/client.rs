//! GeminiProvider -- concrete [`CompletionProvider`] for the Gemini
//! generateContent API.
//!
//! One request per `complete` call, no retries. The API key is wrapped in
//! [`secrecy::SecretString`] and only exposed when building the request;
//! it never appears in Debug output or logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use pathwise_core::llm::provider::CompletionProvider;
use pathwise_types::llm::{CompletionRequest, CompletionResponse, LlmError, MessageRole};

use super::types::{
    GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse,
    GeminiSystemInstruction,
};

/// Gemini completion provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

// GeminiProvider intentionally does NOT derive Debug so the key can never
// leak through formatting.

impl GeminiProvider {
    /// Create a new Gemini provider with a 30-second request timeout.
    pub fn new(api_key: SecretString) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::Upstream {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }

    /// Convert a generic [`CompletionRequest`] into a [`GeminiRequest`].
    ///
    /// Gemini has no `assistant` role; assistant turns map to `model`.
    /// System turns never appear in the transcript (the system prompt
    /// travels in `systemInstruction`), so any are skipped.
    fn to_gemini_request(request: &CompletionRequest) -> GeminiRequest {
        let contents = request
            .messages
            .iter()
            .filter_map(|m| {
                let role = match m.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                    MessageRole::System => return None,
                };
                Some(GeminiContent {
                    role: role.to_string(),
                    parts: vec![GeminiPart {
                        text: m.content.clone(),
                    }],
                })
            })
            .collect();

        GeminiRequest {
            contents,
            system_instruction: request.system.as_ref().map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart { text: text.clone() }],
            }),
            generation_config: Some(GeminiGenerationConfig {
                max_output_tokens: Some(request.max_tokens),
                temperature: request.temperature,
            }),
        }
    }
}

impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_gemini_request(request);
        let url = self.url(&request.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Upstream {
                        message: format!("HTTP request failed: {e}"),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::NotConfigured,
                429 => LlmError::RateLimited,
                _ => LlmError::Upstream {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = gemini_resp
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::Upstream {
                message: "response contained no text candidate".to_string(),
            });
        }

        Ok(CompletionResponse {
            content,
            model: gemini_resp
                .model_version
                .unwrap_or_else(|| request.model.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_types::llm::Message;

    fn make_request() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-1.5-flash".to_string(),
            messages: vec![
                Message {
                    role: MessageRole::User,
                    content: "How do I become a data scientist?".to_string(),
                },
                Message {
                    role: MessageRole::Assistant,
                    content: "Start with statistics.".to_string(),
                },
            ],
            system: Some("You are a career counselor.".to_string()),
            max_tokens: 2048,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = GeminiProvider::new(SecretString::from("test-key-not-real")).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_assistant_role_maps_to_model() {
        let body = GeminiProvider::to_gemini_request(&make_request());
        assert_eq!(body.contents.len(), 2);
        assert_eq!(body.contents[0].role, "user");
        assert_eq!(body.contents[1].role, "model");
    }

    #[test]
    fn test_system_prompt_travels_out_of_band() {
        let mut request = make_request();
        request.messages.insert(
            0,
            Message {
                role: MessageRole::System,
                content: "never in the transcript".to_string(),
            },
        );

        let body = GeminiProvider::to_gemini_request(&request);
        // The system message is skipped; the instruction rides separately.
        assert_eq!(body.contents.len(), 2);
        assert_eq!(
            body.system_instruction.unwrap().parts[0].text,
            "You are a career counselor."
        );
    }

    #[test]
    fn test_generation_config_carries_limits() {
        let body = GeminiProvider::to_gemini_request(&make_request());
        let config = body.generation_config.unwrap();
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.7));
    }

    #[test]
    fn test_url_includes_model() {
        let provider = GeminiProvider::new(SecretString::from("test-key"))
            .unwrap()
            .with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            provider.url("gemini-1.5-flash"),
            "http://localhost:8080/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
