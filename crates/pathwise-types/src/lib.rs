//! Shared domain types for Pathwise.
//!
//! This crate contains the core domain types used across the Pathwise
//! workspace: chat sessions, messages, pagination, completion request
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
pub mod page;
