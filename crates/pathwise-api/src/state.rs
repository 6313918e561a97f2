//! Application state wiring all services together.
//!
//! AppState holds the concrete service instance used by both CLI and
//! REST API. The service is generic over the repository trait, but
//! AppState pins it to the SQLite implementation; the completion
//! provider is chosen at startup from the environment.

use std::path::PathBuf;
use std::sync::Arc;

use pathwise_core::chat::service::ChatService;
use pathwise_core::llm::box_provider::BoxCompletionProvider;
use pathwise_core::llm::prompt::DEFAULT_MODEL;
use pathwise_infra::config;
use pathwise_infra::llm::{GeminiProvider, UnconfiguredProvider};
use pathwise_infra::sqlite::{DatabasePool, SqliteChatRepository};

/// Concrete type alias for the service generic pinned to SQLite.
pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Shared application state holding the chat service.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = config::data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_pool = DatabasePool::open_default().await?;

        // Pick the completion provider from the environment. Without a
        // key the app still runs; sends fail with service-unavailable.
        let provider = match config::gemini_api_key() {
            Some(key) => BoxCompletionProvider::new(GeminiProvider::new(key)?),
            None => {
                tracing::warn!("GEMINI_API_KEY not set; completions are unavailable");
                BoxCompletionProvider::new(UnconfiguredProvider)
            }
        };

        let chat_repo = SqliteChatRepository::new(db_pool.clone());
        let chat_service = ChatService::new(chat_repo, provider, DEFAULT_MODEL.to_string());

        Ok(Self {
            chat_service: Arc::new(chat_service),
            data_dir,
            db_pool,
        })
    }
}
