//! Ports (interfaces) for external collaborators
//!
//! Implemented by adapters in the infrastructure layer and, for progress,
//! by the presentation layer.

pub mod analysis;
pub mod image_editor;
pub mod llm_gateway;
pub mod progress;
pub mod run_logger;
