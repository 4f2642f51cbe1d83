//! Completion-provider client used to turn computed statistics into a
//! single normalized price-factor score.
//!
//! The provider is consumed as a black-box scorer: a fixed rubric goes in
//! as the system message, the formatted statistics as the user message, and
//! the reply is constrained to a JSON object carrying one number.

pub mod client;
pub mod error;
pub mod types;

pub use client::CompletionClient;
pub use error::CompletionError;
