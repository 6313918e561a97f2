//! Gemini completion provider (generateContent API).

mod client;
mod types;

pub use client::GeminiProvider;
