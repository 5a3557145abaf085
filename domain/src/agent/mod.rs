//! Correction experts
//!
//! - [`kind::AgentKind`] - the six expert categories and their default orders
//! - [`instruction::AgentInstruction`] - the structured per-expert directive
//! - [`experts::ExpertAgent`] - the expert contract and its six implementations
//! - [`registry::AgentRegistry`] - the dispatch table handed to router and orchestrator
//! - [`defaults`] / [`expression_templates`] - deterministic instructions

pub mod context;
pub mod defaults;
pub mod experts;
pub mod expression_templates;
pub mod instruction;
pub mod kind;
pub mod registry;

pub use context::EnhancementContext;
pub use experts::{AgentApplication, ExpertAgent};
pub use instruction::{AgentInstruction, Intensity};
pub use kind::AgentKind;
pub use registry::AgentRegistry;
