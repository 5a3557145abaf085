//! Prompt domain
//!
//! Instruction composition and the text prompts sent to the reasoning and
//! vision collaborators.

pub mod composer;
mod routing;
mod vision;

pub use composer::{ComposedDirective, compose};
pub use routing::RoutingPromptTemplate;
pub use vision::VisionPromptTemplate;
