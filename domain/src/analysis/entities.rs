//! Results of the vision collaborator's analysis passes.

use crate::core::scene::{UNKNOWN_SCENE, is_portrait_like};
use crate::signal::entities::{Severity, Signal};
use crate::signal::expression::ExpressionState;
use serde::{Deserialize, Serialize};

/// Likelihood assumed when classification is unavailable.
pub const UNKNOWN_LIKELIHOOD: f64 = 0.5;

/// Scene label, free-text attributes and AI likelihood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneClassification {
    pub primary_scene: String,
    pub attributes: Vec<String>,
    /// In [0, 1]; lower is more realistic
    pub ai_likelihood: f64,
}

impl SceneClassification {
    pub fn new(primary_scene: impl Into<String>, ai_likelihood: f64) -> Self {
        Self {
            primary_scene: primary_scene.into(),
            attributes: Vec::new(),
            ai_likelihood: clamp_likelihood(ai_likelihood),
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Used when the classifier fails on the initial image.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_SCENE, UNKNOWN_LIKELIHOOD)
    }

    pub fn is_portrait_like(&self) -> bool {
        is_portrait_like(&self.primary_scene)
    }
}

/// Clamp into [0, 1]; non-finite becomes the unknown likelihood.
pub fn clamp_likelihood(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        UNKNOWN_LIKELIHOOD
    }
}

/// Everything the analyze pipeline learned about an input image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub classification: SceneClassification,
    pub signals: Vec<Signal>,
    pub expression: ExpressionState,
}

/// Signals for each expression issue when a correction is needed.
pub fn expression_issue_signals(expression: &ExpressionState) -> Vec<Signal> {
    if !expression.correction_needed {
        return Vec::new();
    }
    expression
        .issues
        .iter()
        .map(|issue| Signal::new(format!("[expression] {}", issue), Severity::Medium))
        .collect()
}
