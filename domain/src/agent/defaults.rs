//! Deterministic default instructions, keyed by agent kind and expression state.
//!
//! Used by the heuristic router, by the reasoning router for selected agents
//! the reply left without an instruction, and by agents invoked without one.

use crate::agent::expression_templates::{
    GENERIC_CORRECTION_DENOISING, TEMPLATE_DENOISING, expression_template,
};
use crate::agent::instruction::{AgentInstruction, Intensity};
use crate::agent::kind::AgentKind;
use crate::signal::expression::{ExpressionMode, ExpressionState};

/// Identity clause every default instruction starts from.
pub const BASE_PRESERVATION: &str =
    "maintain overall face shape and identity, preserve hair style";

/// Default instruction for `kind` under the given expression state.
pub fn default_instruction(kind: AgentKind, expression: &ExpressionState) -> AgentInstruction {
    let (positive, negative, steps, areas, denoising): (&str, &str, &[&str], &[&str], f64) =
        match kind {
            AgentKind::Expression => return expression_instruction(expression),
            AgentKind::Skin => (
                "natural skin texture, visible pores, subtle imperfections, realistic skin detail",
                "plastic skin, airbrushed, overly smooth, waxy, artificial",
                &["Add natural skin texture", "Bring back pore detail"],
                &["face", "skin areas"],
                0.18,
            ),
            AgentKind::Lighting => (
                "natural lighting, consistent shadows, soft light falloff, realistic highlights",
                "harsh lighting, inconsistent shadows, artificial highlights, flat lighting",
                &["Unify the light direction", "Soften shadow edges"],
                &["global"],
                0.18,
            ),
            AgentKind::Texture => (
                "detailed texture, natural surface variation, micro details, material authenticity",
                "uniform texture, repetitive patterns, overly clean surfaces, artificial smoothness",
                &["Add surface detail", "Introduce natural wear"],
                &["surfaces", "materials"],
                0.18,
            ),
            AgentKind::Geometry => (
                "correct anatomy, natural proportions, proper perspective, realistic pose",
                "distorted anatomy, extra fingers, wrong proportions, impossible geometry",
                &["Fix anatomical errors", "Adjust proportions"],
                &["body", "hands", "face"],
                0.20,
            ),
            AgentKind::Color => (
                "natural colors, balanced saturation, consistent color temperature, realistic tones",
                "oversaturated, HDR look, artificial colors, inconsistent temperature",
                &["Reduce oversaturation", "Unify color temperature"],
                &["global"],
                0.15,
            ),
        };

    AgentInstruction::new(kind, positive, negative)
        .with_intensity(Intensity::Medium)
        .with_steps(steps.iter().copied())
        .with_target_areas(areas.iter().copied())
        .with_preserve(BASE_PRESERVATION)
        .with_denoising(denoising)
        .with_expression(
            expression.mode(),
            expression.expression_type,
            expression.issues.clone(),
        )
        .with_preservation_guards()
}

/// Instruction for the expression expert.
///
/// In correct mode it comes from the template table, or a generic correction
/// when the expression type has no template. In preserve mode the expert only
/// runs because a signal named an expression problem, so it gets a gentle,
/// guarded refinement.
pub fn expression_instruction(expression: &ExpressionState) -> AgentInstruction {
    let issues = expression.issues.clone();

    if expression.mode() == ExpressionMode::Preserve {
        return AgentInstruction::new(
            AgentKind::Expression,
            "natural facial muscle tone, relaxed micro-expressions",
            "fake expression, stiff face, unnatural smile",
        )
        .with_intensity(Intensity::Light)
        .with_steps(["Relax stiff facial muscles without changing the emotion"])
        .with_target_areas(["face"])
        .with_preserve(BASE_PRESERVATION)
        .with_denoising(Intensity::Light.default_denoising())
        .with_expression(ExpressionMode::Preserve, expression.expression_type, issues)
        .with_preservation_guards();
    }

    match expression_template(expression.expression_type) {
        Some(template) => AgentInstruction::new(
            AgentKind::Expression,
            template.positive,
            template.negative,
        )
        .with_steps(template.steps.iter().copied())
        .with_target_areas(["face", "eyes", "mouth"])
        .with_preserve(template.preservation)
        .with_correct(template.positive)
        .with_denoising(TEMPLATE_DENOISING)
        .with_expression(ExpressionMode::Correct, expression.expression_type, issues),
        None => generic_expression_correction(expression),
    }
}

/// Fallback correction when no template exists for the expression type.
pub fn generic_expression_correction(expression: &ExpressionState) -> AgentInstruction {
    AgentInstruction::new(
        AgentKind::Expression,
        "natural facial expression with proper muscle engagement",
        "fake expression, stiff face, unnatural smile",
    )
    .with_steps(["Correct the direction of the expression muscles"])
    .with_target_areas(["face"])
    .with_preserve("maintain face shape and identity")
    .with_denoising(GENERIC_CORRECTION_DENOISING)
    .with_expression(
        ExpressionMode::Correct,
        expression.expression_type,
        expression.issues.clone(),
    )
}
