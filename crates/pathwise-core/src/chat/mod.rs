//! Chat domain: repository port, session/message service, title derivation.

pub mod repository;
pub mod service;
pub mod title;

#[cfg(test)]
pub(crate) mod testing;
