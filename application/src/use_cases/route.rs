//! Router: reasoning-model routing with a deterministic fallback.
//!
//! [`Router::route`] always terminates in a [`RoutingDecision`]. The primary
//! [`RoutingStrategy`] may fail in any way; the [`HeuristicRoutingStrategy`]
//! then decides from keyword matches alone.

use crate::ports::llm_gateway::{GatewayError, ReasoningGateway};
use async_trait::async_trait;
use realism_domain::{
    AgentKind, AgentRegistry, DomainError, EnhancementContext, ExpressionMode, RoutingDecision,
    RoutingPromptTemplate, default_instruction, parse_routing_reply,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasoning used when there is nothing to fix.
pub const NO_ARTIFACTS_REASONING: &str = "no AI artifacts detected";

/// Why a routing strategy could not produce a decision
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Reasoning request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Unusable reasoning reply: {0}")]
    Reply(#[from] DomainError),
}

/// One way of turning a context into a decision.
#[async_trait]
pub trait RoutingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn route(&self, ctx: &EnhancementContext) -> Result<RoutingDecision, RoutingError>;
}

/// Asks the reasoning collaborator to select experts and write instructions.
pub struct LlmRoutingStrategy {
    gateway: Arc<dyn ReasoningGateway>,
}

impl LlmRoutingStrategy {
    pub fn new(gateway: Arc<dyn ReasoningGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RoutingStrategy for LlmRoutingStrategy {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    async fn route(&self, ctx: &EnhancementContext) -> Result<RoutingDecision, RoutingError> {
        let prompt = RoutingPromptTemplate::routing_prompt(ctx);
        debug!("Routing prompt:\n{}", prompt);

        let reply = self
            .gateway
            .complete(RoutingPromptTemplate::system(), &prompt)
            .await?;
        debug!("Routing reply:\n{}", reply);

        Ok(parse_routing_reply(&reply, ctx)?)
    }
}

/// Keyword-matching router over the agent registry.
pub struct HeuristicRoutingStrategy {
    registry: AgentRegistry,
}

impl HeuristicRoutingStrategy {
    pub fn new(registry: AgentRegistry) -> Self {
        Self { registry }
    }

    /// Every agent whose `can_handle` passes, in the fixed default order,
    /// each with its default instruction.
    pub fn decide(&self, ctx: &EnhancementContext) -> RoutingDecision {
        let selected: Vec<AgentKind> = self
            .registry
            .iter()
            .filter(|agent| agent.can_handle(ctx))
            .map(|agent| agent.kind())
            .collect();

        let table = match ctx.expression_mode() {
            ExpressionMode::Correct => AgentKind::CORRECTING_PRIORITY,
            ExpressionMode::Preserve => AgentKind::PRESERVING_PRIORITY,
        };
        let priority: Vec<AgentKind> = table
            .into_iter()
            .filter(|kind| selected.contains(kind))
            .collect();

        let reasoning = if selected.is_empty() {
            "rule-based routing: no agent matched the detected signals".to_string()
        } else {
            format!(
                "rule-based routing matched: {}",
                priority
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        };

        RoutingDecision::new(selected, priority, reasoning, BTreeMap::new(), |kind| {
            default_instruction(kind, &ctx.expression)
        })
    }
}

#[async_trait]
impl RoutingStrategy for HeuristicRoutingStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn route(&self, ctx: &EnhancementContext) -> Result<RoutingDecision, RoutingError> {
        Ok(self.decide(ctx))
    }
}

/// Primary strategy with heuristic fallback.
pub struct Router {
    primary: Option<Arc<dyn RoutingStrategy>>,
    fallback: HeuristicRoutingStrategy,
}

impl Router {
    /// Router that only uses keyword matching.
    pub fn heuristic(registry: AgentRegistry) -> Self {
        Self {
            primary: None,
            fallback: HeuristicRoutingStrategy::new(registry),
        }
    }

    /// Router that asks the reasoning collaborator first.
    pub fn with_reasoning(registry: AgentRegistry, gateway: Arc<dyn ReasoningGateway>) -> Self {
        Self::with_primary(registry, Arc::new(LlmRoutingStrategy::new(gateway)))
    }

    pub fn with_primary(registry: AgentRegistry, primary: Arc<dyn RoutingStrategy>) -> Self {
        Self {
            primary: Some(primary),
            fallback: HeuristicRoutingStrategy::new(registry),
        }
    }

    /// Decide which experts run this iteration.
    pub async fn route(&self, ctx: &EnhancementContext) -> RoutingDecision {
        if ctx.signals.is_empty() && ctx.expression_mode() == ExpressionMode::Preserve {
            debug!("No signals and nothing to correct, skipping routing");
            return RoutingDecision::empty(NO_ARTIFACTS_REASONING);
        }

        let Some(primary) = &self.primary else {
            return self.fallback.decide(ctx);
        };

        let failure = match primary.route(ctx).await {
            Ok(decision) if !decision.is_empty() => {
                info!(
                    "{} routing selected {:?}",
                    primary.name(),
                    decision.priority_order()
                );
                return decision;
            }
            Ok(_) => format!("{} routing selected no agents", primary.name()),
            Err(e) => e.to_string(),
        };

        warn!("Falling back to rule-based routing: {}", failure);
        let mut decision = self.fallback.decide(ctx);
        decision.reasoning = format!("{} (reasoning unavailable: {})", decision.reasoning, failure);
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockReasoning, context};
    use realism_domain::{ExpressionState, ExpressionType};

    fn laughing() -> ExpressionState {
        ExpressionState::new(
            ExpressionType::BigLaugh,
            false,
            vec!["missing crow's feet".to_string()],
        )
    }

    #[tokio::test]
    async fn test_empty_signals_skip_reasoning() {
        let gateway = Arc::new(MockReasoning::new(vec![]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway.clone());
        let decision = router.route(&context("portrait", &[])).await;
        assert!(decision.is_empty());
        assert_eq!(decision.reasoning, NO_ARTIFACTS_REASONING);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reasoning_path_is_used_when_valid() {
        let gateway = Arc::new(MockReasoning::new(vec![Ok(r#"{
            "agents_to_invoke": ["color"],
            "priority_order": ["color"],
            "reasoning": "colors are oversaturated"
        }"#
        .to_string())]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway.clone());
        let decision = router
            .route(&context("portrait", &["oversaturated colors"]))
            .await;
        assert_eq!(decision.priority_order(), &[AgentKind::Color]);
        assert_eq!(decision.reasoning, "colors are oversaturated");
        assert_eq!(gateway.call_count(), 1);
        assert!(gateway.prompts()[0].contains("oversaturated colors"));
    }

    #[tokio::test]
    async fn test_gateway_failure_falls_back() {
        let gateway = Arc::new(MockReasoning::new(vec![Err(GatewayError::Timeout)]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway);
        let decision = router
            .route(&context("portrait", &["oversaturated colors"]))
            .await;
        assert_eq!(decision.selected_agents(), &[AgentKind::Color]);
        assert!(decision.reasoning.contains("reasoning unavailable"));
        assert!(decision.reasoning.contains("Timeout"));
    }

    #[tokio::test]
    async fn test_malformed_reply_falls_back() {
        let gateway = Arc::new(MockReasoning::new(vec![Ok(
            "I think the skin looks fake.".to_string()
        )]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway);
        let decision = router.route(&context("portrait", &["plastic skin"])).await;
        assert_eq!(decision.selected_agents(), &[AgentKind::Skin]);
        assert!(decision.instruction_for(AgentKind::Skin).is_some());
    }

    #[tokio::test]
    async fn test_empty_selection_falls_back() {
        let gateway = Arc::new(MockReasoning::new(vec![Ok(
            r#"{"agents_to_invoke": [], "reasoning": "looks fine"}"#.to_string(),
        )]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway);
        let decision = router
            .route(&context("landscape", &["inconsistent shadows"]))
            .await;
        assert_eq!(decision.selected_agents(), &[AgentKind::Lighting]);
    }

    #[tokio::test]
    async fn test_fallback_never_empty_when_an_agent_matches() {
        let router = Router::heuristic(AgentRegistry::standard());
        let cases: &[(&str, &str, AgentKind)] = &[
            ("portrait", "waxy complexion", AgentKind::Skin),
            ("landscape", "harsh highlight on rocks", AgentKind::Lighting),
            ("product", "repetitive pattern", AgentKind::Texture),
            ("interior", "distorted perspective", AgentKind::Geometry),
            ("food", "HDR look", AgentKind::Color),
            ("portrait", "stiff grin", AgentKind::Expression),
        ];
        for (scene, signal, expected) in cases {
            let decision = router.route(&context(scene, &[*signal])).await;
            assert!(
                decision.selected_agents().contains(expected),
                "{} on {} should select {}",
                signal,
                scene,
                expected
            );
        }
    }

    #[tokio::test]
    async fn test_fallback_priority_when_preserving() {
        let router = Router::heuristic(AgentRegistry::standard());
        let ctx = context(
            "portrait",
            &["oversaturated colors", "plastic skin", "extra finger", "stiff smile"],
        );
        let decision = router.route(&ctx).await;
        assert_eq!(
            decision.priority_order(),
            &[
                AgentKind::Geometry,
                AgentKind::Skin,
                AgentKind::Color,
                AgentKind::Expression
            ]
        );
        for instruction in decision.instructions() {
            assert!(instruction.negative_directive.contains("altered expression"));
            assert!(
                instruction
                    .preserve_directive
                    .contains("preserve exact facial expression")
            );
        }
    }

    #[tokio::test]
    async fn test_correct_mode_promotes_expression_and_uses_template() {
        let router = Router::heuristic(AgentRegistry::standard());
        let ctx = context("portrait", &["plastic skin"]).with_expression(laughing());
        let decision = router.route(&ctx).await;
        assert_eq!(
            decision.priority_order(),
            &[AgentKind::Expression, AgentKind::Skin]
        );
        let template = realism_domain::agent::expression_templates::expression_template(
            ExpressionType::BigLaugh,
        )
        .unwrap();
        let instruction = decision.instruction_for(AgentKind::Expression).unwrap();
        assert_eq!(instruction.positive_directive, template.positive);
        assert_eq!(instruction.negative_directive, template.negative);
        assert_eq!(instruction.preserve_directive, template.preservation);
    }

    #[tokio::test]
    async fn test_correct_mode_routes_without_signals() {
        let gateway = Arc::new(MockReasoning::new(vec![Err(GatewayError::Other(
            "down".to_string(),
        ))]));
        let router = Router::with_reasoning(AgentRegistry::standard(), gateway.clone());
        let ctx = context("portrait", &[]).with_expression(laughing());
        let decision = router.route(&ctx).await;
        assert_eq!(decision.priority_order(), &[AgentKind::Expression]);
        assert_eq!(gateway.call_count(), 1);
    }
}
