//! Merge an instruction's preserve, correct and base clauses into the
//! directive handed to the editing collaborator.

use crate::agent::instruction::AgentInstruction;
use crate::core::text::join_clauses;
use crate::signal::expression::ExpressionMode;
use serde::{Deserialize, Serialize};

/// Deterrent appended to the negative side while preserving the expression.
pub const COMPOSED_EXPRESSION_DETERRENT: &str =
    "altered expression, different emotion, changed facial expression";

/// The effective directive for one edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedDirective {
    pub positive: String,
    pub negative: String,
    pub denoising_strength: f64,
}

/// Compose the final directive.
///
/// Positive side order is fixed: preserve, then correct (correct mode only),
/// then the base positive directive. Negative side is the base negative
/// directive plus the expression deterrent in preserve mode.
pub fn compose(instruction: &AgentInstruction) -> ComposedDirective {
    let correcting = instruction.expression_mode == ExpressionMode::Correct;

    let mut positive_parts = vec![instruction.preserve_directive.as_str()];
    if correcting {
        positive_parts.push(instruction.correct_directive.as_str());
    }
    positive_parts.push(instruction.positive_directive.as_str());

    let mut negative_parts = vec![instruction.negative_directive.as_str()];
    if !correcting && !instruction.negative_directive.contains(COMPOSED_EXPRESSION_DETERRENT) {
        negative_parts.push(COMPOSED_EXPRESSION_DETERRENT);
    }

    ComposedDirective {
        positive: join_clauses(positive_parts),
        negative: join_clauses(negative_parts),
        denoising_strength: instruction.denoising_strength,
    }
}
