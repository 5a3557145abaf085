//! Prompt sent to the reasoning collaborator to pick experts and write
//! their instructions.

use crate::agent::context::EnhancementContext;
use crate::enhancement::entities::AgentResult;
use crate::signal::entities::format_signal_list;

/// Templates for the routing request.
pub struct RoutingPromptTemplate;

impl RoutingPromptTemplate {
    /// System prompt for the routing request.
    pub fn system() -> &'static str {
        r#"You are an image-enhancement router. You decide which correction experts should repair an AI-generated image and write a precise editing instruction for each of them.
Never describe or infer the identity of any person in the image.
Return ONLY a JSON object, no other text."#
    }

    /// User prompt describing the current image state.
    pub fn routing_prompt(ctx: &EnhancementContext) -> String {
        let signals = if ctx.signals.is_empty() {
            "- none".to_string()
        } else {
            format_signal_list(&ctx.signals)
        };
        let issues = if ctx.expression.issues.is_empty() {
            String::new()
        } else {
            format!("- Issues: {}\n", ctx.expression.issues.join("; "))
        };
        let history = Self::history_section(&ctx.previous_results);

        format!(
            r#"Scene type: {scene}
AI likelihood: {likelihood:.0}%
Iteration: {iteration}

Detected problems:
{signals}

Expression analysis:
- Type: {expression_type}
- Natural: {natural}
- Mode: {mode}
{issues}{history}
Available experts:
1. SKIN - plastic or overly smooth skin, missing pores, airbrushed look
2. LIGHTING - inconsistent light direction, wrong shadows, odd highlights
3. TEXTURE - over-uniform textures, missing micro detail, surfaces that are too clean
4. GEOMETRY - wrong finger count, broken proportions, impossible perspective
5. COLOR - oversaturation, HDR look, inconsistent color temperature
6. EXPRESSION - facial muscle problems (a laugh without crow's feet, crying without red eye rims)

Expression policy:
- If mode is "preserve": every preservation_prompt must contain "preserve exact facial expression", every negative_prompt must contain "altered expression, different emotion", and EXPRESSION is not invoked.
- If mode is "correct": invoke EXPRESSION first, write a muscle-specific correction_prompt for the expression type, keep identity in preservation_prompt while allowing the expression to change, and use denoising_strength between 0.25 and 0.35.

Intensity to denoising_strength:
- "light": 0.10-0.15
- "medium": 0.18-0.25
- "strong": 0.28-0.35

Return JSON in this shape:
{{
  "agents_to_invoke": ["EXPRESSION", "SKIN"],
  "reasoning": "short explanation of the choice",
  "priority_order": ["EXPRESSION", "SKIN"],
  "agent_prompts": {{
    "EXPRESSION": {{
      "preservation_prompt": "maintain overall face shape and identity, preserve hair style",
      "correction_prompt": "Duchenne smile with crow's feet at eye corners, raised apple cheeks",
      "positive_prompt": "natural smile with proper muscle engagement",
      "negative_prompt": "fake smile, eyes wide open while laughing, stiff expression",
      "intensity": "medium",
      "denoising_strength": 0.28,
      "expression_mode": "correct",
      "expression_type": "big_laugh",
      "expression_issues": ["eyes not squinting", "missing crow's feet"],
      "specific_instructions": ["Add crow's feet at the eye corners", "Lift the apple cheeks"],
      "target_areas": ["eyes", "cheeks", "mouth"]
    }}
  }}
}}

Only write prompts for the experts you select. Return ONLY the JSON object."#,
            scene = ctx.scene_type,
            likelihood = ctx.ai_likelihood * 100.0,
            iteration = ctx.iteration,
            signals = signals,
            expression_type = ctx.expression.expression_type,
            natural = if ctx.expression.is_natural { "yes" } else { "no" },
            mode = ctx.expression_mode(),
            issues = issues,
            history = history,
        )
    }

    fn history_section(results: &[AgentResult]) -> String {
        if results.is_empty() {
            return String::new();
        }
        let mut section = String::from("\nAlready tried in earlier iterations:\n");
        for result in results {
            let status = if result.success { "ok" } else { "failed" };
            section.push_str(&format!(
                "- {} ({}): {}\n",
                result.agent_kind, status, result.description
            ));
        }
        section
    }
}
