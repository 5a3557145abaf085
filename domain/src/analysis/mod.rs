//! Image analysis domain
//!
//! Scene classification, artifact signals and expression state as returned
//! by the vision collaborator, plus the parsers for its replies.

pub mod entities;
pub mod parsing;

pub use entities::{ImageAnalysis, SceneClassification, expression_issue_signals};
pub use parsing::{parse_classification, parse_expression, parse_signals};
