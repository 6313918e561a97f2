//! Completion service ports: provider trait, type-erased wrapper, and the
//! fixed counselor prompt.

pub mod box_provider;
pub mod prompt;
pub mod provider;
