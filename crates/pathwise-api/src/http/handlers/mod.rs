//! HTTP request handlers.

pub mod message;
pub mod session;
