//! Human-readable run summary. Purely derivative; never used for control.

use crate::agent::kind::AgentKind;
use crate::enhancement::confidence::AiConfidenceLevel;
use crate::enhancement::entities::{IterationRecord, StoppedReason};
use crate::signal::expression::{ExpressionState, ExpressionType};

/// One-paragraph description of a finished run.
pub fn build_summary(
    iterations: &[IterationRecord],
    initial_likelihood: f64,
    final_likelihood: f64,
    expression: &ExpressionState,
    stopped_reason: StoppedReason,
) -> String {
    let mut parts = Vec::new();

    if iterations.is_empty() {
        parts.push("No iterations ran.".to_string());
    } else {
        let counts = invocation_counts(iterations);
        let agents = if counts.is_empty() {
            "none".to_string()
        } else {
            counts
                .iter()
                .map(|(kind, n)| format!("{}({})", kind, n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let noun = if iterations.len() == 1 {
            "iteration"
        } else {
            "iterations"
        };
        parts.push(format!(
            "Ran {} {}; agents invoked: {}.",
            iterations.len(),
            noun,
            agents
        ));
    }

    let delta = (initial_likelihood - final_likelihood) * 100.0;
    let trend = if delta >= 0.0 { "improved" } else { "worsened" };
    parts.push(format!(
        "AI likelihood {:.0}% -> {:.0}% ({} {:.1} points).",
        initial_likelihood * 100.0,
        final_likelihood * 100.0,
        trend,
        delta.abs()
    ));
    parts.push(format!(
        "AI confidence: {} -> {}.",
        AiConfidenceLevel::from_likelihood(initial_likelihood).label(),
        AiConfidenceLevel::from_likelihood(final_likelihood).label()
    ));

    if expression.expression_type != ExpressionType::Neutral {
        parts.push(format!(
            "Expression: {} ({}).",
            expression.expression_type.label(),
            expression.mode()
        ));
    }

    parts.push(format!("Stopped: {}.", stopped_reason.describe()));
    parts.join(" ")
}

/// Invocation count per agent, in order of first invocation.
pub fn invocation_counts(iterations: &[IterationRecord]) -> Vec<(AgentKind, usize)> {
    let mut counts: Vec<(AgentKind, usize)> = Vec::new();
    for kind in iterations.iter().flat_map(|it| it.agents_invoked.iter()) {
        match counts.iter_mut().find(|(k, _)| k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((*kind, 1)),
        }
    }
    counts
}
