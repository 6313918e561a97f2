//! Infrastructure layer for Pathwise.
//!
//! Contains implementations of the ports defined in `pathwise-core`:
//! SQLite storage for sessions and messages, the Gemini completion
//! provider, and environment-based configuration.

pub mod config;
pub mod llm;
pub mod sqlite;
