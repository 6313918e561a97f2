//! Business logic and repository trait definitions for Pathwise.
//!
//! This crate defines the "ports" (the chat repository and completion
//! provider traits) that the infrastructure layer implements, the
//! server-side send/receive procedure, and the client-side session
//! lifecycle and optimistic messaging state machine. It depends only on
//! `pathwise-types` -- never on `pathwise-infra` or any database/IO crate.

pub mod chat;
pub mod client;
pub mod llm;
