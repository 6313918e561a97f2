//! REST API: router, envelope responses, error mapping, extractors.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
