use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in
/// pathwise-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// User-facing error taxonomy for the chat core.
///
/// Each variant is a distinct failure domain of the send/receive
/// procedure and the session lifecycle operations:
///
/// - `Validation` is rejected locally, before any network or store call.
/// - `Persistence` means a store operation failed.
/// - `Completion` means the language-model call failed or timed out;
///   a user turn persisted before the call stays persisted.
/// - `ServiceUnavailable` means the completion service is unreachable
///   or has no credential configured.
/// - `NotFound` means a rename/delete/select target is missing.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("completion error: {0}")]
    Completion(String),

    #[error("completion service unavailable")]
    ServiceUnavailable,

    #[error("not found")]
    NotFound,
}

impl From<RepositoryError> for ChatError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ChatError::NotFound,
            other => ChatError::Persistence(other.to_string()),
        }
    }
}

impl From<LlmError> for ChatError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::NotConfigured => ChatError::ServiceUnavailable,
            other => ChatError::Completion(other.to_string()),
        }
    }
}

/// Errors surfaced by the client-side submit pipeline.
///
/// A second submit while one is in flight is rejected with `Busy` as a
/// no-op, leaving all pipeline state untouched.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a send is already in flight for this session")]
    Busy,

    #[error(transparent)]
    Chat(#[from] ChatError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_repository_not_found_maps_to_chat_not_found() {
        let err: ChatError = RepositoryError::NotFound.into();
        assert!(matches!(err, ChatError::NotFound));
    }

    #[test]
    fn test_repository_query_maps_to_persistence() {
        let err: ChatError = RepositoryError::Query("disk full".to_string()).into();
        match err {
            ChatError::Persistence(msg) => assert!(msg.contains("disk full")),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_credential_maps_to_service_unavailable() {
        let err: ChatError = LlmError::NotConfigured.into();
        assert!(matches!(err, ChatError::ServiceUnavailable));
    }

    #[test]
    fn test_upstream_maps_to_completion() {
        let err: ChatError = LlmError::Timeout.into();
        assert!(matches!(err, ChatError::Completion(_)));
    }
}
