//! Client-side state machine: session lifecycle and the optimistic
//! message pipeline.
//!
//! This module is the entire contract the presentation layer depends on.
//! It owns which session is current (none, a local draft, or a committed
//! row) and the pending-turn overlay shown before the server confirms a
//! send.

pub mod controller;
pub mod state;
pub mod transcript;

pub use controller::ChatClient;
pub use state::CurrentSession;
pub use transcript::{TranscriptEntry, merge_transcript};
