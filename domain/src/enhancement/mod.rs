//! Enhancement run domain
//!
//! - [`entities::AgentResult`] / [`entities::IterationRecord`] - run history
//! - [`entities::RunResult`] / [`entities::StoppedReason`] - terminal result
//! - [`confidence::AiConfidenceLevel`] - five-band reading of a likelihood
//! - [`summary`] - human-readable summary text

pub mod confidence;
pub mod entities;
pub mod summary;

pub use confidence::AiConfidenceLevel;
pub use entities::{AgentResult, IterationRecord, RunResult, StoppedReason};
pub use summary::build_summary;
