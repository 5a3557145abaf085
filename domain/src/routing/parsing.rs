//! Convert the reasoning collaborator's loosely-typed reply into a strict
//! [`RoutingDecision`].
//!
//! Unknown agent names are dropped, wrong-typed fields fall back to
//! defaults and the expression guards are re-applied, so nothing untyped
//! leaves this module.

use crate::agent::context::EnhancementContext;
use crate::agent::defaults::default_instruction;
use crate::agent::expression_templates::clamp_correction_denoising;
use crate::agent::instruction::{AgentInstruction, Intensity};
use crate::agent::kind::AgentKind;
use crate::core::error::DomainError;
use crate::core::json::{number_field, parse_json_object, str_field, string_list};
use crate::routing::decision::RoutingDecision;
use crate::signal::expression::{ExpressionMode, ExpressionType};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse a routing reply.
///
/// Fails when the reply has no usable JSON object or selects no known agent;
/// callers treat either as a routing failure and fall back.
pub fn parse_routing_reply(
    reply: &str,
    ctx: &EnhancementContext,
) -> Result<RoutingDecision, DomainError> {
    let json = parse_json_object(reply)?;

    let selected = agent_list(&json, "agents_to_invoke");
    if selected.is_empty() {
        return Err(DomainError::EmptyRouting);
    }
    let priority = agent_list(&json, "priority_order");
    let reasoning = str_field(&json, "reasoning").unwrap_or_default().to_string();

    let mut instructions = BTreeMap::new();
    if let Some(prompts) = json.get("agent_prompts").and_then(Value::as_object) {
        for (name, body) in prompts {
            let Ok(kind) = name.parse::<AgentKind>() else {
                continue;
            };
            if body.is_object() && selected.contains(&kind) {
                instructions.insert(kind, parse_instruction(kind, body, ctx));
            }
        }
    }

    Ok(RoutingDecision::new(
        selected,
        priority,
        reasoning,
        instructions,
        |kind| default_instruction(kind, &ctx.expression),
    ))
}

fn agent_list(json: &Value, key: &str) -> Vec<AgentKind> {
    json.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|name| name.parse::<AgentKind>().ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Build one instruction from an `agent_prompts` entry.
fn parse_instruction(kind: AgentKind, body: &Value, ctx: &EnhancementContext) -> AgentInstruction {
    let intensity = str_field(body, "intensity")
        .map(Intensity::parse_lenient)
        .unwrap_or_default();

    // A preserve-mode context can never be switched to correction by the reply.
    let mode = match ctx.expression_mode() {
        ExpressionMode::Preserve => ExpressionMode::Preserve,
        ExpressionMode::Correct => str_field(body, "expression_mode")
            .and_then(|m| m.parse().ok())
            .unwrap_or(ExpressionMode::Correct),
    };
    let expression_type = str_field(body, "expression_type")
        .map(ExpressionType::parse_lenient)
        .unwrap_or(ctx.expression.expression_type);
    let issues = string_list(body, "expression_issues")
        .unwrap_or_else(|| ctx.expression.issues.clone());

    let mut denoising = number_field(body, "denoising_strength")
        .unwrap_or_else(|| intensity.default_denoising());
    if kind == AgentKind::Expression && mode == ExpressionMode::Correct {
        denoising = clamp_correction_denoising(denoising);
    }

    AgentInstruction::new(
        kind,
        str_field(body, "positive_prompt").unwrap_or_default(),
        str_field(body, "negative_prompt").unwrap_or_default(),
    )
    .with_intensity(intensity)
    .with_steps(string_list(body, "specific_instructions").unwrap_or_default())
    .with_target_areas(string_list(body, "target_areas").unwrap_or_default())
    .with_preserve(str_field(body, "preservation_prompt").unwrap_or_default())
    .with_correct(str_field(body, "correction_prompt").unwrap_or_default())
    .with_denoising(denoising)
    .with_expression(mode, expression_type, issues)
    .with_preservation_guards()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::instruction::{EXPRESSION_DETERRENT, EXPRESSION_PRESERVATION_CLAUSE};
    use crate::core::image::ImageData;
    use crate::signal::entities::{Severity, Signal};
    use crate::signal::expression::ExpressionState;

    fn ctx() -> EnhancementContext {
        EnhancementContext::new(ImageData::jpeg(vec![1u8]), "portrait", 0.8)
            .with_signals(vec![Signal::new("plastic skin", Severity::High)])
    }

    fn correcting_ctx() -> EnhancementContext {
        ctx().with_expression(ExpressionState::new(
            ExpressionType::BigLaugh,
            false,
            vec!["missing crow's feet".into()],
        ))
    }

    #[test]
    fn test_full_reply() {
        let reply = r#"```json
{
  "agents_to_invoke": ["SKIN", "COLOR"],
  "reasoning": "skin looks plastic",
  "priority_order": ["COLOR", "SKIN"],
  "agent_prompts": {
    "SKIN": {
      "positive_prompt": "visible pores",
      "negative_prompt": "plastic skin",
      "intensity": "light",
      "specific_instructions": ["Add pores"],
      "target_areas": ["face"],
      "preservation_prompt": "keep identity",
      "denoising_strength": 0.14
    }
  }
}
```"#;
        let decision = parse_routing_reply(reply, &ctx()).unwrap();
        assert_eq!(
            decision.priority_order(),
            &[AgentKind::Color, AgentKind::Skin]
        );
        assert_eq!(decision.reasoning, "skin looks plastic");

        let skin = decision.instruction_for(AgentKind::Skin).unwrap();
        assert_eq!(skin.positive_directive, "visible pores");
        assert_eq!(skin.intensity, Intensity::Light);
        assert_eq!(skin.denoising_strength, 0.14);
        assert_eq!(
            skin.negative_directive,
            format!("plastic skin, {}", EXPRESSION_DETERRENT)
        );
        assert_eq!(
            skin.preserve_directive,
            format!("keep identity, {}", EXPRESSION_PRESERVATION_CLAUSE)
        );

        // color had no prompt: deterministic default
        let color = decision.instruction_for(AgentKind::Color).unwrap();
        assert_eq!(color.denoising_strength, 0.15);
    }

    #[test]
    fn test_unknown_agents_dropped_and_priority_completed() {
        let reply = r#"{
            "agents_to_invoke": ["skin", "HAIR", "lighting"],
            "priority_order": ["lighting", "hair", "texture"]
        }"#;
        let decision = parse_routing_reply(reply, &ctx()).unwrap();
        assert_eq!(
            decision.selected_agents(),
            &[AgentKind::Skin, AgentKind::Lighting]
        );
        assert_eq!(
            decision.priority_order(),
            &[AgentKind::Lighting, AgentKind::Skin]
        );
        assert!(decision.reasoning.is_empty());
    }

    #[test]
    fn test_only_unknown_agents_is_empty_routing() {
        let reply = r#"{"agents_to_invoke": ["hair"], "reasoning": "x"}"#;
        assert_eq!(
            parse_routing_reply(reply, &ctx()).unwrap_err(),
            DomainError::EmptyRouting
        );
    }

    #[test]
    fn test_wrong_typed_selection_is_empty_routing() {
        let reply = r#"{"agents_to_invoke": "skin"}"#;
        assert_eq!(
            parse_routing_reply(reply, &ctx()).unwrap_err(),
            DomainError::EmptyRouting
        );
    }

    #[test]
    fn test_prose_reply_is_an_error() {
        let err = parse_routing_reply("Sorry, I can't do that.", &ctx()).unwrap_err();
        assert!(err.is_reply_error());
    }

    #[test]
    fn test_intensity_sets_denoising_when_missing() {
        let reply = r#"{
            "agents_to_invoke": ["skin"],
            "agent_prompts": {"skin": {"positive_prompt": "pores", "intensity": "strong"}}
        }"#;
        let decision = parse_routing_reply(reply, &ctx()).unwrap();
        let skin = decision.instruction_for(AgentKind::Skin).unwrap();
        assert_eq!(skin.denoising_strength, 0.30);
    }

    #[test]
    fn test_denoising_out_of_range_is_clamped() {
        let reply = r#"{
            "agents_to_invoke": ["skin"],
            "agent_prompts": {"skin": {"denoising_strength": 4.0}}
        }"#;
        let decision = parse_routing_reply(reply, &ctx()).unwrap();
        assert_eq!(
            decision.instruction_for(AgentKind::Skin).unwrap().denoising_strength,
            1.0
        );
    }

    #[test]
    fn test_expression_correction_band_enforced() {
        let reply = r#"{
            "agents_to_invoke": ["EXPRESSION"],
            "agent_prompts": {"EXPRESSION": {
                "correction_prompt": "genuine laugh",
                "denoising_strength": 0.6,
                "expression_mode": "correct",
                "expression_type": "big_laugh"
            }}
        }"#;
        let decision = parse_routing_reply(reply, &correcting_ctx()).unwrap();
        let expression = decision.instruction_for(AgentKind::Expression).unwrap();
        assert_eq!(expression.denoising_strength, 0.35);
        assert_eq!(expression.expression_mode, ExpressionMode::Correct);
        assert_eq!(expression.expression_issues, vec!["missing crow's feet"]);
        assert!(!expression.negative_directive.contains("altered expression"));
    }

    #[test]
    fn test_reply_cannot_switch_preserve_to_correct() {
        let reply = r#"{
            "agents_to_invoke": ["skin"],
            "agent_prompts": {"skin": {"expression_mode": "correct", "negative_prompt": "waxy"}}
        }"#;
        let decision = parse_routing_reply(reply, &ctx()).unwrap();
        let skin = decision.instruction_for(AgentKind::Skin).unwrap();
        assert_eq!(skin.expression_mode, ExpressionMode::Preserve);
        assert!(skin.negative_directive.contains("altered expression"));
    }
}
