//! Per-invocation state handed to an expert.

use crate::agent::instruction::AgentInstruction;
use crate::core::image::ImageData;
use crate::core::scene::UNKNOWN_SCENE;
use crate::enhancement::entities::AgentResult;
use crate::signal::entities::Signal;
use crate::signal::expression::{ExpressionMode, ExpressionState};

/// Everything an expert (and the router) knows about the current image.
///
/// The orchestrator builds one per iteration and clones it per agent,
/// swapping in the current image and the agent's instruction.
#[derive(Debug, Clone)]
pub struct EnhancementContext {
    pub image: ImageData,
    pub scene_type: String,
    pub ai_likelihood: f64,
    pub signals: Vec<Signal>,
    /// 1-based iteration number
    pub iteration: u32,
    /// Results of agents already run in this iteration
    pub previous_results: Vec<AgentResult>,
    pub expression: ExpressionState,
    pub instruction: Option<AgentInstruction>,
}

impl EnhancementContext {
    pub fn new(image: ImageData, scene_type: impl Into<String>, ai_likelihood: f64) -> Self {
        Self {
            image,
            scene_type: scene_type.into(),
            ai_likelihood,
            signals: Vec::new(),
            iteration: 1,
            previous_results: Vec::new(),
            expression: ExpressionState::neutral(),
            instruction: None,
        }
    }

    /// Context for an image whose scene could not be classified.
    pub fn unclassified(image: ImageData) -> Self {
        Self::new(image, UNKNOWN_SCENE, 0.5)
    }

    pub fn with_signals(mut self, signals: Vec<Signal>) -> Self {
        self.signals = signals;
        self
    }

    pub fn with_expression(mut self, expression: ExpressionState) -> Self {
        self.expression = expression;
        self
    }

    pub fn with_iteration(mut self, iteration: u32) -> Self {
        self.iteration = iteration;
        self
    }

    /// Copy for one agent invocation: current image plus its instruction.
    pub fn for_agent(
        &self,
        image: ImageData,
        instruction: AgentInstruction,
        previous_results: Vec<AgentResult>,
    ) -> Self {
        Self {
            image,
            instruction: Some(instruction),
            previous_results,
            ..self.clone()
        }
    }

    pub fn expression_mode(&self) -> ExpressionMode {
        self.expression.mode()
    }
}
