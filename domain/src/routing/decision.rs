//! The router's output for one iteration.

use crate::agent::instruction::AgentInstruction;
use crate::agent::kind::AgentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which experts run, in what order, with which instructions.
///
/// Built through [`RoutingDecision::new`], which keeps the invariants:
/// `priority_order` is a permutation of `selected_agents` and every selected
/// agent has exactly one instruction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoutingDecision {
    selected_agents: Vec<AgentKind>,
    priority_order: Vec<AgentKind>,
    pub reasoning: String,
    instruction_by_agent: BTreeMap<AgentKind, AgentInstruction>,
}

impl RoutingDecision {
    /// Assemble a decision.
    ///
    /// Duplicate selections collapse to their first occurrence. Priority
    /// entries that were not selected are dropped and selected agents
    /// missing from the priority list are appended in selection order.
    /// `instruction_for_missing` supplies an instruction for any selected
    /// agent without one; instructions for unselected agents are discarded.
    pub fn new(
        selected: impl IntoIterator<Item = AgentKind>,
        priority: impl IntoIterator<Item = AgentKind>,
        reasoning: impl Into<String>,
        mut instructions: BTreeMap<AgentKind, AgentInstruction>,
        mut instruction_for_missing: impl FnMut(AgentKind) -> AgentInstruction,
    ) -> Self {
        let mut selected_agents: Vec<AgentKind> = Vec::new();
        for kind in selected {
            if !selected_agents.contains(&kind) {
                selected_agents.push(kind);
            }
        }

        let mut priority_order: Vec<AgentKind> = Vec::new();
        for kind in priority {
            if selected_agents.contains(&kind) && !priority_order.contains(&kind) {
                priority_order.push(kind);
            }
        }
        for kind in &selected_agents {
            if !priority_order.contains(kind) {
                priority_order.push(*kind);
            }
        }

        instructions.retain(|kind, _| selected_agents.contains(kind));
        for kind in &selected_agents {
            instructions
                .entry(*kind)
                .or_insert_with(|| instruction_for_missing(*kind));
        }

        Self {
            selected_agents,
            priority_order,
            reasoning: reasoning.into(),
            instruction_by_agent: instructions,
        }
    }

    /// A decision that runs nothing.
    pub fn empty(reasoning: impl Into<String>) -> Self {
        Self {
            reasoning: reasoning.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected_agents.is_empty()
    }

    pub fn selected_agents(&self) -> &[AgentKind] {
        &self.selected_agents
    }

    pub fn priority_order(&self) -> &[AgentKind] {
        &self.priority_order
    }

    pub fn instruction_for(&self, kind: AgentKind) -> Option<&AgentInstruction> {
        self.instruction_by_agent.get(&kind)
    }

    pub fn instructions(&self) -> impl Iterator<Item = &AgentInstruction> {
        self.instruction_by_agent.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(kind: AgentKind) -> AgentInstruction {
        AgentInstruction::new(kind, "default", "")
    }

    #[test]
    fn test_priority_is_a_permutation_of_selection() {
        let decision = RoutingDecision::new(
            [AgentKind::Skin, AgentKind::Color, AgentKind::Lighting],
            [AgentKind::Color, AgentKind::Geometry, AgentKind::Color],
            "r",
            BTreeMap::new(),
            stub,
        );
        assert_eq!(
            decision.priority_order(),
            &[AgentKind::Color, AgentKind::Skin, AgentKind::Lighting]
        );
        assert_eq!(decision.selected_agents().len(), 3);
    }

    #[test]
    fn test_every_selected_agent_gets_one_instruction() {
        let mut explicit = BTreeMap::new();
        explicit.insert(
            AgentKind::Skin,
            AgentInstruction::new(AgentKind::Skin, "explicit", ""),
        );
        explicit.insert(
            AgentKind::Texture,
            AgentInstruction::new(AgentKind::Texture, "unselected", ""),
        );
        let decision = RoutingDecision::new(
            [AgentKind::Skin, AgentKind::Color],
            Vec::new(),
            "r",
            explicit,
            stub,
        );
        assert_eq!(
            decision.instruction_for(AgentKind::Skin).unwrap().positive_directive,
            "explicit"
        );
        assert_eq!(
            decision.instruction_for(AgentKind::Color).unwrap().positive_directive,
            "default"
        );
        assert!(decision.instruction_for(AgentKind::Texture).is_none());
        assert_eq!(decision.instructions().count(), 2);
    }

    #[test]
    fn test_empty_decision() {
        let decision = RoutingDecision::empty("nothing to do");
        assert!(decision.is_empty());
        assert!(decision.priority_order().is_empty());
        assert_eq!(decision.reasoning, "nothing to do");
    }
}
