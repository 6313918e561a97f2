//! ChatRepository trait definition.
//!
//! CRUD-style access to the two record types -- sessions and messages --
//! with no business logic beyond ordering and filtering. Uses native
//! async fn in traits (RPITIT); implementations live in pathwise-infra
//! (e.g., `SqliteChatRepository`).

use pathwise_types::chat::{ChatMessage, ChatSession};
use pathwise_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
pub trait ChatRepository: Send + Sync {
    /// Insert a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Rename a session and bump its `updated_at`.
    ///
    /// Errors with `RepositoryError::NotFound` if no row matched.
    fn rename_session(
        &self,
        session_id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session and (by cascade) its messages.
    ///
    /// Errors with `RepositoryError::NotFound` if no row matched.
    fn delete_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List sessions for an owner, ordered by `updated_at` DESC.
    fn list_sessions(
        &self,
        owner_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Total number of sessions for an owner.
    fn count_sessions(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Insert a message and bump the parent session's `updated_at`.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get messages for a session, ordered by `created_at` ASC
    /// (ties broken by insertion order).
    fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Total number of messages in a session.
    fn count_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
