//! The client controller: session lifecycle manager plus optimistic
//! message pipeline.
//!
//! `ChatClient` owns the `CurrentSession` state machine, the cached
//! session list, the authoritative transcript, and the pending-turn
//! overlay. All methods take `&mut self` and suspend only at the
//! service boundary, so operations on one client are serialized
//! (single-threaded cooperative); the `in_flight` flag makes the
//! reject-while-busy rule explicit and testable.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use pathwise_types::chat::{ChatMessage, ChatSession, PendingTurn};
use pathwise_types::error::{ChatError, SubmitError};
use pathwise_types::page::Page;
use tracing::debug;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::chat::service::ChatService;
use crate::chat::title::{FALLBACK_TITLE, TITLE_TOKEN_BUDGET, derive_title};
use crate::client::state::CurrentSession;
use crate::client::transcript::{TranscriptEntry, merge_transcript};

/// Session list page size used when the UI does not ask for another.
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Client-side chat state machine over a [`ChatService`].
pub struct ChatClient<C: ChatRepository> {
    service: Arc<ChatService<C>>,
    owner_id: String,
    current: CurrentSession,
    sessions: Page<ChatSession>,
    /// Authoritative transcript of the current committed session.
    transcript: Vec<ChatMessage>,
    /// Optimistic overlay; never retained across a session switch.
    pending: Vec<PendingTurn>,
    /// Set for the duration of a send; cleared by guard even when the
    /// `submit` future is dropped mid-await.
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag on drop, so a cancelled `submit` cannot
/// leave the client permanently rejecting sends as busy.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self(Arc::clone(flag))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<C: ChatRepository> ChatClient<C> {
    /// Create a client for one user. Initial state is `None` until the
    /// user selects a session or starts a draft.
    pub fn new(service: Arc<ChatService<C>>, owner_id: impl Into<String>) -> Self {
        Self {
            service,
            owner_id: owner_id.into(),
            current: CurrentSession::None,
            sessions: Page::new(Vec::new(), 0, 1, DEFAULT_PAGE_SIZE),
            transcript: Vec::new(),
            pending: Vec::new(),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    // --- State exposed to the presentation layer ---

    pub fn current(&self) -> &CurrentSession {
        &self.current
    }

    pub fn sessions(&self) -> &Page<ChatSession> {
        &self.sessions
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The UI-visible transcript: authoritative rows plus the pending
    /// overlay, scoped to the current committed session.
    pub fn merged_transcript(&self) -> Vec<TranscriptEntry> {
        match self.current.committed_id() {
            Some(session_id) => {
                let scoped: Vec<PendingTurn> = self
                    .pending
                    .iter()
                    .filter(|p| p.session_id == session_id)
                    .cloned()
                    .collect();
                merge_transcript(&self.transcript, &scoped)
            }
            None => Vec::new(),
        }
    }

    // --- Session lifecycle ---

    /// Start a local draft. Clears any pending turns and the transcript;
    /// never touches the store.
    pub fn start_draft(&mut self, title_hint: Option<&str>) {
        let title = title_hint
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_TITLE)
            .to_string();
        self.current = CurrentSession::Draft { title };
        self.pending.clear();
        self.transcript.clear();
        debug!("draft started");
    }

    /// Make a committed session current and fetch its transcript.
    ///
    /// Pending turns from the previously current session are dropped
    /// unconditionally -- they are scoped to the session they were
    /// created for. (Drafts carry no id, so selecting a draft is
    /// unrepresentable rather than rejected at runtime.)
    pub async fn select(&mut self, session_id: Uuid) -> Result<(), ChatError> {
        self.pending.clear();
        let transcript = self.service.get_messages(&session_id).await?;
        self.current = CurrentSession::Committed(session_id);
        self.transcript = transcript;
        Ok(())
    }

    /// Rename a session. Empty titles are rejected locally without a
    /// store call; the rename itself is not shown optimistically.
    pub async fn rename(&mut self, session_id: Uuid, new_title: &str) -> Result<(), ChatError> {
        self.service.rename_session(&session_id, new_title).await?;
        self.refresh_sessions(self.sessions.page, self.sessions.page_size)
            .await
    }

    /// Remove a session.
    ///
    /// `None` targets the draft: a purely local discard with no store
    /// call and no possible error. `Some(id)` delegates deletion and, if
    /// the removed session was current, transitions to `None`.
    pub async fn remove(&mut self, session_id: Option<Uuid>) -> Result<(), ChatError> {
        let Some(session_id) = session_id else {
            if self.current.is_draft() {
                self.current = CurrentSession::None;
                self.pending.clear();
                self.transcript.clear();
            }
            return Ok(());
        };

        self.service.delete_session(&session_id).await?;
        if self.current.committed_id() == Some(session_id) {
            self.current = CurrentSession::None;
            self.pending.clear();
            self.transcript.clear();
        }
        self.refresh_sessions(self.sessions.page, self.sessions.page_size)
            .await
    }

    /// Refresh the cached session list, ordered by `updated_at` DESC.
    pub async fn refresh_sessions(&mut self, page: u32, page_size: u32) -> Result<(), ChatError> {
        self.sessions = self
            .service
            .list_sessions(&self.owner_id, page, page_size)
            .await?;
        Ok(())
    }

    // --- Optimistic message pipeline ---

    /// Submit a user message to the current session.
    ///
    /// Empty content and submissions while a send is in flight are
    /// rejected as no-ops. A draft is promoted to a committed session
    /// first (title from the first four tokens of the message); if that
    /// creation fails the draft stays intact and nothing else happens.
    /// The message is visible immediately via the pending overlay; on
    /// completion or failure the overlay entry is dropped -- on failure
    /// the caller must refetch to learn whether the user turn landed.
    pub async fn submit(&mut self, content: &str) -> Result<(), SubmitError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::Validation("message content must not be empty".to_string()).into());
        }
        if self.is_in_flight() {
            return Err(SubmitError::Busy);
        }

        let session_id = match &self.current {
            CurrentSession::None => {
                return Err(
                    ChatError::Validation("no session selected".to_string()).into(),
                );
            }
            CurrentSession::Draft { .. } => {
                // Promote the draft; on failure the draft stays intact.
                let title = derive_title(content, TITLE_TOKEN_BUDGET);
                let session = self.service.create_session(&self.owner_id, &title).await?;
                self.current = CurrentSession::Committed(session.id);
                self.transcript.clear();
                debug!(session_id = %session.id, "draft promoted");
                session.id
            }
            CurrentSession::Committed(id) => *id,
        };

        let pending_turn = PendingTurn::new(session_id, content.to_string());
        let local_id = pending_turn.local_id;
        self.pending.push(pending_turn);
        let in_flight = InFlightGuard::engage(&self.in_flight);

        let result = self.service.send_turn(&session_id, content).await;

        // The overlay entry for this submission is dropped on both
        // outcomes; only a transcript refetch is authoritative. The
        // flag lifts here: the refetch below is not a send.
        self.pending.retain(|p| p.local_id != local_id);
        drop(in_flight);

        match result {
            Ok(_) => {
                self.transcript = self.service.get_messages(&session_id).await?;
                self.refresh_sessions(self.sessions.page, self.sessions.page_size)
                    .await?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::testing::{
        AlternatingProvider, FailingProvider, FixedProvider, InMemoryChatRepository,
        StallingProvider,
    };
    use crate::llm::box_provider::BoxCompletionProvider;
    use crate::llm::prompt::DEFAULT_MODEL;
    use pathwise_types::llm::{LlmError, MessageRole};

    fn client_with(provider: BoxCompletionProvider) -> ChatClient<InMemoryChatRepository> {
        let service = Arc::new(ChatService::new(
            InMemoryChatRepository::default(),
            provider,
            DEFAULT_MODEL.to_string(),
        ));
        ChatClient::new(service, "user-1")
    }

    fn fixed_client(reply: &str) -> ChatClient<InMemoryChatRepository> {
        client_with(BoxCompletionProvider::new(FixedProvider::new(reply)))
    }

    #[tokio::test]
    async fn test_initial_state_is_none() {
        let client = fixed_client("ok");
        assert!(client.current().is_none());
        assert!(client.merged_transcript().is_empty());
        assert!(!client.is_in_flight());
    }

    #[tokio::test]
    async fn test_draft_submit_creates_session_with_derived_title() {
        let mut client = fixed_client("Great goal! Let's plan.");
        client.start_draft(None);

        client
            .submit("I want to switch into data science")
            .await
            .unwrap();

        // Draft promoted and both turns visible.
        let sid = client.current().committed_id().expect("committed");
        let transcript = client.merged_transcript();
        assert_eq!(transcript.len(), 2);
        assert!(transcript.iter().all(|e| !e.pending));
        assert_eq!(transcript[0].role, MessageRole::User);
        assert_eq!(transcript[1].role, MessageRole::Assistant);

        // Session list refreshed: exactly one session, 4-token title.
        assert_eq!(client.sessions().total, 1);
        let session = &client.sessions().items[0];
        assert_eq!(session.id, sid);
        assert_eq!(session.title, "I want to switch");
        assert!(session.updated_at >= session.created_at);
    }

    #[tokio::test]
    async fn test_empty_submit_is_rejected_locally() {
        let mut client = fixed_client("ok");
        client.start_draft(None);

        let err = client.submit("   ").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Chat(ChatError::Validation(_))
        ));
        // Still a draft; nothing was created.
        assert!(client.current().is_draft());
        assert_eq!(client.service.repo().call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_without_session_is_rejected() {
        let mut client = fixed_client("ok");
        let err = client.submit("hello").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Chat(ChatError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_draft_promotion_keeps_draft_intact() {
        let mut client = fixed_client("ok");
        client.start_draft(Some("My draft"));
        client.service.repo().set_fail_create_session(true);

        let err = client.submit("hello there").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Chat(ChatError::Persistence(_))
        ));
        assert!(client.current().is_draft());
        assert!(client.merged_transcript().is_empty());
        assert!(!client.is_in_flight());
    }

    #[tokio::test]
    async fn test_failed_send_clears_pending_and_matches_authoritative() {
        let mut client = client_with(BoxCompletionProvider::new(FailingProvider::new(
            || LlmError::Upstream {
                message: "boom".to_string(),
            },
        )));
        client.start_draft(None);

        let err = client.submit("does this work?").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Chat(ChatError::Completion(_))
        ));

        // Pending overlay empty; merged view equals last known
        // authoritative transcript (which was empty).
        assert!(client.merged_transcript().is_empty());
        assert!(!client.is_in_flight());

        // But a fresh fetch still shows the orphaned user turn.
        let sid = client.current().committed_id().unwrap();
        let rows = client.service.get_messages(&sid).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role, MessageRole::User);

        // After an explicit re-select, the orphan is visible.
        client.select(sid).await.unwrap();
        let transcript = client.merged_transcript();
        assert_eq!(transcript.len(), 1);
        assert!(!transcript[0].pending);
    }

    #[tokio::test]
    async fn test_select_clears_pending_from_previous_session() {
        let mut client = fixed_client("reply");
        client.start_draft(None);
        client.submit("first conversation").await.unwrap();
        let first_id = client.current().committed_id().unwrap();

        // Second session.
        client.start_draft(None);
        client.submit("second conversation").await.unwrap();

        // Force a stale pending turn, then switch: it must not leak.
        client
            .pending
            .push(PendingTurn::new(first_id, "stale".to_string()));
        let second_id = client.current().committed_id().unwrap();
        client.select(first_id).await.unwrap();
        assert!(client.pending.is_empty());
        assert!(client.merged_transcript().iter().all(|e| !e.pending));

        client.select(second_id).await.unwrap();
        assert_eq!(client.merged_transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_start_draft_then_remove_is_local_only() {
        let mut client = fixed_client("ok");
        client.start_draft(Some("Scratch"));
        client.remove(None).await.unwrap();

        assert!(client.current().is_none());
        // No store call was ever made.
        assert_eq!(client.service.repo().call_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_current_session_transitions_to_none() {
        let mut client = fixed_client("reply");
        client.start_draft(None);
        client.submit("hello").await.unwrap();
        let sid = client.current().committed_id().unwrap();

        client.remove(Some(sid)).await.unwrap();
        assert!(client.current().is_none());
        assert!(client.merged_transcript().is_empty());
        assert_eq!(client.sessions().total, 0);
    }

    #[tokio::test]
    async fn test_remove_missing_session_is_not_found() {
        let mut client = fixed_client("ok");
        let err = client.remove(Some(Uuid::now_v7())).await.unwrap_err();
        assert!(matches!(err, ChatError::NotFound));
    }

    #[tokio::test]
    async fn test_rename_empty_title_rejected_without_store_call() {
        let mut client = fixed_client("ok");
        let err = client.rename(Uuid::now_v7(), "  ").await.unwrap_err();
        assert!(matches!(err, ChatError::Validation(_)));
        assert_eq!(client.service.repo().call_count(), 0);
    }

    #[tokio::test]
    async fn test_rename_refreshes_session_list() {
        let mut client = fixed_client("reply");
        client.start_draft(None);
        client.submit("name me").await.unwrap();
        let sid = client.current().committed_id().unwrap();

        client.rename(sid, "Better title").await.unwrap();
        assert_eq!(client.sessions().items[0].title, "Better title");
    }

    #[tokio::test]
    async fn test_assistant_turns_never_exceed_user_turns_under_failures() {
        let mut client = client_with(BoxCompletionProvider::new(AlternatingProvider::new(
            "answer",
        )));
        client.start_draft(None);

        for i in 0..5 {
            let _ = client.submit(&format!("message {i}")).await;
        }

        let sid = client.current().committed_id().unwrap();
        let rows = client.service.get_messages(&sid).await.unwrap();
        let users = rows.iter().filter(|m| m.role == MessageRole::User).count();
        let assistants = rows
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .count();
        assert!(assistants <= users);
        assert_eq!(users, 5);
    }

    #[tokio::test]
    async fn test_cancelled_submit_releases_in_flight_flag() {
        use std::future::Future;
        use std::task::{Context, Poll, Waker};

        let mut client = client_with(BoxCompletionProvider::new(StallingProvider));
        client.start_draft(None);

        {
            // Drive the send into the provider await, then drop it, as a
            // caller timing out or abandoning the future would.
            let mut fut = Box::pin(client.submit("are you there?"));
            let mut cx = Context::from_waker(Waker::noop());
            assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
        }

        // The flag must not stay latched, or every later send is Busy.
        assert!(!client.is_in_flight());
        assert!(client.current().committed_id().is_some());
    }

    #[tokio::test]
    async fn test_late_persistence_failure_surfaces_and_clears_overlay() {
        let mut client = fixed_client("reply");
        client.start_draft(None);
        client.submit("seed the session").await.unwrap();

        // Everything after the user turn write fails.
        client.service.repo().set_fail_save_message(true);
        let err = client.submit("and now?").await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Chat(ChatError::Persistence(_))
        ));
        assert!(!client.is_in_flight());
        assert!(client.merged_transcript().iter().all(|e| !e.pending));
    }
}
