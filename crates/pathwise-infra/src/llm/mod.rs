//! Completion provider implementations.
//!
//! `gemini` is the real HTTP-backed provider; `unconfigured` stands in
//! when no API key is present so the rest of the app keeps working.

pub mod gemini;
pub mod unconfigured;

pub use gemini::GeminiProvider;
pub use unconfigured::UnconfiguredProvider;
