//! Run history: per-agent results, iteration records and the final result.

use crate::agent::instruction::AgentInstruction;
use crate::agent::kind::AgentKind;
use crate::core::image::ImageData;
use crate::enhancement::confidence::AiConfidenceLevel;
use crate::routing::decision::RoutingDecision;
use crate::signal::entities::Signal;
use crate::signal::expression::ExpressionState;
use serde::Serialize;
use std::fmt;

/// Outcome of one agent invocation.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResult {
    pub success: bool,
    pub agent_kind: AgentKind,
    /// The edited image on success, the unmodified input on failure
    #[serde(skip)]
    pub resulting_image: ImageData,
    pub description: String,
    pub changes_applied: Vec<String>,
    pub error_message: Option<String>,
    pub instruction_used: Option<AgentInstruction>,
}

impl AgentResult {
    pub fn success(
        agent_kind: AgentKind,
        resulting_image: ImageData,
        description: impl Into<String>,
        changes_applied: Vec<String>,
        instruction_used: AgentInstruction,
    ) -> Self {
        Self {
            success: true,
            agent_kind,
            resulting_image,
            description: description.into(),
            changes_applied,
            error_message: None,
            instruction_used: Some(instruction_used),
        }
    }

    /// A fault; `original_image` must be the image the agent received.
    pub fn failure(
        agent_kind: AgentKind,
        original_image: ImageData,
        error_message: impl Into<String>,
    ) -> Self {
        let error_message = error_message.into();
        Self {
            success: false,
            agent_kind,
            resulting_image: original_image,
            description: format!("{} agent failed", agent_kind),
            changes_applied: Vec::new(),
            error_message: Some(error_message),
            instruction_used: None,
        }
    }

    pub fn with_instruction(mut self, instruction: AgentInstruction) -> Self {
        self.instruction_used = Some(instruction);
        self
    }
}

/// One analyze→route→fix cycle.
#[derive(Debug, Clone, Serialize)]
pub struct IterationRecord {
    /// 1-based
    pub index: u32,
    pub likelihood_before: f64,
    pub likelihood_after: f64,
    pub agents_invoked: Vec<AgentKind>,
    pub agent_results: Vec<AgentResult>,
    pub signals_before: Vec<Signal>,
    pub signals_after: Vec<Signal>,
    pub decision: RoutingDecision,
}

impl IterationRecord {
    /// Positive means the image looks less generated.
    pub fn improvement(&self) -> f64 {
        self.likelihood_before - self.likelihood_after
    }

    pub fn successful_agents(&self) -> usize {
        self.agent_results.iter().filter(|r| r.success).count()
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppedReason {
    ThresholdReached,
    NoAgentsNeeded,
    NoImprovement,
    MaxIterations,
    Error,
    Cancelled,
}

impl StoppedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoppedReason::ThresholdReached => "threshold_reached",
            StoppedReason::NoAgentsNeeded => "no_agents_needed",
            StoppedReason::NoImprovement => "no_improvement",
            StoppedReason::MaxIterations => "max_iterations",
            StoppedReason::Error => "error",
            StoppedReason::Cancelled => "cancelled",
        }
    }

    /// Human-readable explanation for summaries.
    pub fn describe(&self) -> &'static str {
        match self {
            StoppedReason::ThresholdReached => "image looks realistic enough",
            StoppedReason::NoAgentsNeeded => "no correction needed",
            StoppedReason::NoImprovement => "improvement below threshold",
            StoppedReason::MaxIterations => "iteration budget exhausted",
            StoppedReason::Error => "editing failed",
            StoppedReason::Cancelled => "cancelled",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, StoppedReason::Error | StoppedReason::Cancelled)
    }
}

impl fmt::Display for StoppedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal object of a run.
///
/// Always well formed: even a failed run carries the last good image.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    #[serde(skip)]
    pub original_image: ImageData,
    #[serde(skip)]
    pub enhanced_image: ImageData,
    pub scene_type: String,
    pub iterations: Vec<IterationRecord>,
    pub initial_likelihood: f64,
    pub final_likelihood: f64,
    pub initial_confidence: AiConfidenceLevel,
    pub final_confidence: AiConfidenceLevel,
    pub final_signals: Vec<Signal>,
    pub expression: ExpressionState,
    pub summary: String,
    pub stopped_reason: StoppedReason,
    pub error_message: Option<String>,
}

impl RunResult {
    /// Total likelihood drop over the run.
    pub fn improvement(&self) -> f64 {
        self.initial_likelihood - self.final_likelihood
    }

    pub fn iteration_count(&self) -> usize {
        self.iterations.len()
    }

    /// Whether the returned image differs from the input.
    pub fn image_changed(&self) -> bool {
        !self.enhanced_image.same_buffer(&self.original_image)
    }

    /// Every agent result across all iterations, in execution order.
    pub fn all_agent_results(&self) -> impl Iterator<Item = &AgentResult> {
        self.iterations.iter().flat_map(|it| it.agent_results.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_keeps_original_image() {
        let image = ImageData::jpeg(vec![9u8, 9]);
        let result = AgentResult::failure(AgentKind::Skin, image.clone(), "boom");
        assert!(!result.success);
        assert!(result.resulting_image.same_buffer(&image));
        assert_eq!(result.error_message.as_deref(), Some("boom"));
        assert_eq!(result.description, "skin agent failed");
    }

    #[test]
    fn test_stopped_reason_serializes_snake_case() {
        let json = serde_json::to_string(&StoppedReason::ThresholdReached).unwrap();
        assert_eq!(json, "\"threshold_reached\"");
        assert_eq!(StoppedReason::NoAgentsNeeded.to_string(), "no_agents_needed");
        assert!(StoppedReason::Cancelled.is_failure());
        assert!(!StoppedReason::MaxIterations.is_failure());
    }

    #[test]
    fn test_iteration_improvement() {
        let record = IterationRecord {
            index: 1,
            likelihood_before: 0.8,
            likelihood_after: 0.5,
            agents_invoked: vec![AgentKind::Color],
            agent_results: vec![],
            signals_before: vec![],
            signals_after: vec![],
            decision: RoutingDecision::empty(""),
        };
        assert!((record.improvement() - 0.3).abs() < 1e-9);
    }
}
