//! SQLite persistence: split read/write pool and the chat repository.

pub mod chat;
pub mod pool;

pub use chat::SqliteChatRepository;
pub use pool::DatabasePool;
