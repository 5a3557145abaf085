//! Dispatch table of the six experts, built once and passed explicitly.

use crate::agent::experts::{
    ColorAgent, ExpertAgent, ExpressionAgent, GeometryAgent, LightingAgent, SkinAgent,
    TextureAgent,
};
use crate::agent::kind::AgentKind;
use std::sync::Arc;

/// One expert per [`AgentKind`], indexed by [`AgentKind::index`].
#[derive(Clone)]
pub struct AgentRegistry {
    agents: [Arc<dyn ExpertAgent>; 6],
}

impl AgentRegistry {
    /// Registry with the built-in experts.
    pub fn standard() -> Self {
        Self {
            agents: [
                Arc::new(SkinAgent),
                Arc::new(LightingAgent),
                Arc::new(TextureAgent),
                Arc::new(GeometryAgent),
                Arc::new(ColorAgent),
                Arc::new(ExpressionAgent),
            ],
        }
    }

    /// Replace the expert registered for `agent.kind()`.
    pub fn with_agent(mut self, agent: Arc<dyn ExpertAgent>) -> Self {
        let index = agent.kind().index();
        self.agents[index] = agent;
        self
    }

    pub fn get(&self, kind: AgentKind) -> &dyn ExpertAgent {
        self.agents[kind.index()].as_ref()
    }

    /// Experts in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ExpertAgent> {
        self.agents.iter().map(|a| a.as_ref())
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.agents.iter().map(|a| a.kind()))
            .finish()
    }
}
