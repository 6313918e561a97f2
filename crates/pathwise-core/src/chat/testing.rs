//! In-memory fakes for the repository and provider ports, used across
//! the core crate's unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use pathwise_types::chat::{ChatMessage, ChatSession};
use pathwise_types::error::RepositoryError;
use pathwise_types::llm::{CompletionRequest, CompletionResponse, LlmError};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::llm::provider::CompletionProvider;

#[derive(Default)]
struct State {
    sessions: Vec<ChatSession>,
    messages: Vec<ChatMessage>,
    calls: u64,
    fail_create_session: bool,
    fail_save_message: bool,
}

/// In-memory `ChatRepository` with call counting and failure injection.
#[derive(Default)]
pub(crate) struct InMemoryChatRepository {
    state: Mutex<State>,
}

impl InMemoryChatRepository {
    /// Number of repository calls made so far (spy for "no network call"
    /// style assertions).
    pub(crate) fn call_count(&self) -> u64 {
        self.state.lock().unwrap().calls
    }

    pub(crate) fn set_fail_create_session(&self, fail: bool) {
        self.state.lock().unwrap().fail_create_session = fail;
    }

    pub(crate) fn set_fail_save_message(&self, fail: bool) {
        self.state.lock().unwrap().fail_save_message = fail;
    }
}

impl ChatRepository for InMemoryChatRepository {
    async fn create_session(
        &self,
        session: &ChatSession,
    ) -> Result<ChatSession, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.fail_create_session {
            return Err(RepositoryError::Query("injected create failure".to_string()));
        }
        state.sessions.push(session.clone());
        Ok(session.clone())
    }

    async fn get_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(state.sessions.iter().find(|s| s.id == *session_id).cloned())
    }

    async fn rename_session(
        &self,
        session_id: &Uuid,
        title: &str,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        match state.sessions.iter_mut().find(|s| s.id == *session_id) {
            Some(session) => {
                session.title = title.to_string();
                session.updated_at = Utc::now();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete_session(&self, session_id: &Uuid) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.id != *session_id);
        if state.sessions.len() == before {
            return Err(RepositoryError::NotFound);
        }
        state.messages.retain(|m| m.session_id != *session_id);
        Ok(())
    }

    async fn list_sessions(
        &self,
        owner_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let mut sessions: Vec<ChatSession> = state
            .sessions
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| (b.updated_at, b.id).cmp(&(a.updated_at, a.id)));

        let offset = offset.unwrap_or(0).max(0) as usize;
        let sessions: Vec<ChatSession> = sessions.into_iter().skip(offset).collect();
        Ok(match limit {
            Some(limit) => sessions.into_iter().take(limit.max(0) as usize).collect(),
            None => sessions,
        })
    }

    async fn count_sessions(&self, owner_id: &str) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(state
            .sessions
            .iter()
            .filter(|s| s.owner_id == owner_id)
            .count() as u64)
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        if state.fail_save_message {
            return Err(RepositoryError::Query("injected save failure".to_string()));
        }
        state.messages.push(message.clone());
        if let Some(session) = state
            .sessions
            .iter_mut()
            .find(|s| s.id == message.session_id)
        {
            session.updated_at = message.created_at;
        }
        Ok(())
    }

    async fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        let mut messages: Vec<ChatMessage> = state
            .messages
            .iter()
            .filter(|m| m.session_id == *session_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        let offset = offset.unwrap_or(0).max(0) as usize;
        let messages: Vec<ChatMessage> = messages.into_iter().skip(offset).collect();
        Ok(match limit {
            Some(limit) => messages.into_iter().take(limit.max(0) as usize).collect(),
            None => messages,
        })
    }

    async fn count_messages(&self, session_id: &Uuid) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.calls += 1;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.session_id == *session_id)
            .count() as u64)
    }
}

/// Provider that always answers with a fixed reply.
pub(crate) struct FixedProvider {
    reply: String,
}

impl FixedProvider {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

impl CompletionProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model: request.model.clone(),
        })
    }
}

/// Provider that always fails with the configured error.
pub(crate) struct FailingProvider {
    make_error: fn() -> LlmError,
}

impl FailingProvider {
    pub(crate) fn new(make_error: fn() -> LlmError) -> Self {
        Self { make_error }
    }
}

impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        Err((self.make_error)())
    }
}

/// Provider whose call never resolves; lets tests park a send mid-await
/// and observe in-flight state.
pub(crate) struct StallingProvider;

impl CompletionProvider for StallingProvider {
    fn name(&self) -> &str {
        "stalling"
    }

    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        std::future::pending().await
    }
}

/// Provider that alternates success and failure, starting with success.
pub(crate) struct AlternatingProvider {
    reply: String,
    calls: AtomicUsize,
}

impl AlternatingProvider {
    pub(crate) fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl CompletionProvider for AlternatingProvider {
    fn name(&self) -> &str {
        "alternating"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n % 2 == 0 {
            Ok(CompletionResponse {
                content: self.reply.clone(),
                model: request.model.clone(),
            })
        } else {
            Err(LlmError::Upstream {
                message: "injected alternating failure".to_string(),
            })
        }
    }
}
