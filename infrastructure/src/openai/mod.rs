//! OpenAI-compatible chat adapter
//!
//! Implements the reasoning and vision gateway ports over `/chat/completions`.

pub mod client;
pub mod protocol;
