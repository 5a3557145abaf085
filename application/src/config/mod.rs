//! Application-level configuration.
//!
//! - [`EnhancementParams`] - iteration cap and stop thresholds
//! - [`EditPollParams`] - poll interval and attempt bound for edits

pub mod enhancement_params;

pub use enhancement_params::{EditPollParams, EnhancementParams};
