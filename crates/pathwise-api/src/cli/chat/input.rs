//! Async line input for the chat loop.
//!
//! Thin wrapper over `rustyline_async::Readline` that folds the crate's
//! event/error surface into the three outcomes the loop cares about:
//! a trimmed line, end of input, or an interrupt.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a message (whitespace-trimmed).
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler for the chat loop.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create an input handler with the given prompt.
    ///
    /// The paired `SharedWriter` is dropped: this loop only prints
    /// between `read_line` calls, while no prompt is on screen.
    pub fn new(prompt: String) -> Result<Self, ReadlineError> {
        let (rl, _out) = Readline::new(prompt)?;
        Ok(Self { rl })
    }

    /// Read a line of input. Read errors end the loop like Ctrl+D.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Message(line.trim().to_string()),
            Ok(ReadlineEvent::Eof) | Err(_) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}
