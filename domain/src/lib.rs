//! Domain layer for realism-enhancer
//!
//! This crate contains the core types and decision logic of the
//! analyze→route→fix loop. It has no dependencies on infrastructure or
//! presentation concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Signals
//!
//! A [`Signal`] is one detected indicator that part of an image looks
//! generated. An [`ExpressionState`] describes the face; its
//! [`ExpressionMode`] decides whether the expression is preserved or fixed.
//!
//! ## Experts
//!
//! Six [`ExpertAgent`]s (skin, lighting, texture, geometry, color,
//! expression) each own a keyword vocabulary and a scene rule. The
//! [`AgentRegistry`] is the dispatch table handed to the router and the
//! orchestrator.
//!
//! ## Routing
//!
//! A [`RoutingDecision`] names the experts to run, their order and one
//! [`AgentInstruction`] each. [`compose`] turns an instruction into the
//! directive sent to the editing collaborator.

pub mod agent;
pub mod analysis;
pub mod core;
pub mod enhancement;
pub mod prompt;
pub mod routing;
pub mod signal;

// Re-export commonly used types
pub use agent::{
    AgentApplication, AgentInstruction, AgentKind, AgentRegistry, EnhancementContext,
    ExpertAgent, Intensity,
    defaults::default_instruction,
};
pub use analysis::{
    ImageAnalysis, SceneClassification, expression_issue_signals, parse_classification,
    parse_expression, parse_signals,
};
pub use core::{error::DomainError, image::ImageData};
pub use enhancement::{
    AgentResult, AiConfidenceLevel, IterationRecord, RunResult, StoppedReason, build_summary,
};
pub use prompt::{ComposedDirective, RoutingPromptTemplate, VisionPromptTemplate, compose};
pub use routing::{RoutingDecision, parse_routing_reply};
pub use signal::{
    entities::{Dimension, Severity, Signal},
    expression::{ExpressionMode, ExpressionState, ExpressionType},
};
