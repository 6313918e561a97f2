//! Interactive chat loop over the client state machine.

pub mod commands;
pub mod input;
pub mod runner;
