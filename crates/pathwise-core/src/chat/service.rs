//! Chat service orchestrating session lifecycle and the send/receive
//! procedure.
//!
//! `ChatService` coordinates the `ChatRepository` and the completion
//! provider: creating sessions, listing with pagination, renaming,
//! deleting, and `send_turn` -- the single coordinated operation that
//! turns one user message into a persisted user/assistant turn pair.

use chrono::Utc;
use pathwise_types::chat::{ChatMessage, ChatSession, MessageRole};
use pathwise_types::error::ChatError;
use pathwise_types::page::Page;
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::llm::box_provider::BoxCompletionProvider;
use crate::llm::prompt::build_completion_request;

/// Largest accepted page size for session listing.
const MAX_PAGE_SIZE: u32 = 100;

/// Orchestrates chat session lifecycle and message exchange.
///
/// Generic over `ChatRepository` to keep the dependency direction clean
/// (pathwise-core never depends on pathwise-infra). The completion
/// provider is type-erased so the concrete backend is wired at startup.
pub struct ChatService<C: ChatRepository> {
    repo: C,
    provider: BoxCompletionProvider,
    model: String,
}

impl<C: ChatRepository> ChatService<C> {
    /// Create a new chat service with the given repository and provider.
    pub fn new(repo: C, provider: BoxCompletionProvider, model: String) -> Self {
        Self {
            repo,
            provider,
            model,
        }
    }

    /// Access the chat repository.
    pub fn repo(&self) -> &C {
        &self.repo
    }

    /// Name of the wired completion provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    // --- Session lifecycle ---

    /// Create a new session for an owner.
    ///
    /// The title is trimmed and must be non-empty; the id is assigned
    /// here (UUID v7), and `created_at == updated_at` at birth.
    pub async fn create_session(
        &self,
        owner_id: &str,
        title: &str,
    ) -> Result<ChatSession, ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::Validation("title must not be empty".to_string()));
        }

        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7(),
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.create_session(&session).await?;
        info!(session_id = %created.id, "session created");
        Ok(created)
    }

    /// Get a session by ID, or `ChatError::NotFound`.
    pub async fn get_session(&self, session_id: &Uuid) -> Result<ChatSession, ChatError> {
        self.repo
            .get_session(session_id)
            .await?
            .ok_or(ChatError::NotFound)
    }

    /// List an owner's sessions ordered by `updated_at` DESC, paginated.
    ///
    /// `page` is 1-based; `page_size` is clamped to `[1, 100]`. Total and
    /// page counts come from the total row count, not the returned page.
    pub async fn list_sessions(
        &self,
        owner_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Page<ChatSession>, ChatError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = (page as i64 - 1) * page_size as i64;

        let items = self
            .repo
            .list_sessions(owner_id, Some(page_size as i64), Some(offset))
            .await?;
        let total = self.repo.count_sessions(owner_id).await?;

        Ok(Page::new(items, total, page, page_size))
    }

    /// Rename a session. The new title must be non-empty after trimming;
    /// validation happens locally, before any store call.
    pub async fn rename_session(&self, session_id: &Uuid, title: &str) -> Result<(), ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::Validation("title must not be empty".to_string()));
        }

        self.repo.rename_session(session_id, title).await?;
        info!(session_id = %session_id, "session renamed");
        Ok(())
    }

    /// Delete a session and its messages.
    pub async fn delete_session(&self, session_id: &Uuid) -> Result<(), ChatError> {
        self.repo.delete_session(session_id).await?;
        info!(session_id = %session_id, "session deleted");
        Ok(())
    }

    /// Get the full ordered transcript for a session.
    pub async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self.repo.get_messages(session_id, None, None).await?)
    }

    // --- Send/receive procedure ---

    /// The unit of consistency for one turn exchange.
    ///
    /// Four fallible steps, each a distinct failure domain:
    ///
    /// 1. persist the user turn -- on failure nothing else happens;
    /// 2. read back the full ordered transcript (now including that turn);
    /// 3. call the completion provider -- on failure the user turn
    ///    **stays persisted** (a failed generation never rolls back the
    ///    user's message);
    /// 4. persist the assistant turn -- on failure the user turn is
    ///    likewise left intact.
    ///
    /// No transaction spans the steps; a caller that sees an error must
    /// refetch the transcript to learn which turns landed.
    pub async fn send_turn(
        &self,
        session_id: &Uuid,
        content: &str,
    ) -> Result<(ChatMessage, ChatMessage), ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::Validation(
                "message content must not be empty".to_string(),
            ));
        }

        // Step 1: persist the user turn unconditionally first.
        let user_turn = ChatMessage {
            id: Uuid::now_v7(),
            session_id: *session_id,
            role: MessageRole::User,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.repo.save_message(&user_turn).await?;

        // Step 2: read back the full ordered transcript.
        let history = self.repo.get_messages(session_id, None, None).await?;

        // Step 3: one completion call, no retries.
        let request = build_completion_request(&history, &self.model);
        let response = match self.provider.complete(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "completion failed; user turn kept");
                return Err(e.into());
            }
        };

        // Step 4: persist the assistant turn.
        let assistant_turn = ChatMessage {
            id: Uuid::now_v7(),
            session_id: *session_id,
            role: MessageRole::Assistant,
            content: response.content,
            created_at: Utc::now(),
        };
        self.repo.save_message(&assistant_turn).await?;

        info!(session_id = %session_id, "turn exchange completed");
        Ok((user_turn, assistant_turn))
    }
}
