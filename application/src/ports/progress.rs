//! Progress notification port
//!
//! Defines the interface for reporting progress during an enhancement run.

use realism_domain::{AgentKind, AgentResult, IterationRecord, RoutingDecision, RunResult};

/// Callback for progress updates during an enhancement run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait EnhancementProgress: Send + Sync {
    /// Called when iteration `index` (1-based) starts
    fn on_iteration_start(&self, index: u32, likelihood: f64);

    /// Called once the router has decided
    fn on_routing_complete(&self, decision: &RoutingDecision);

    /// Called before an agent runs
    fn on_agent_start(&self, _kind: AgentKind) {}

    /// Called after an agent ran, successfully or not
    fn on_agent_complete(&self, result: &AgentResult);

    /// Called after re-detection, once the iteration is recorded
    fn on_iteration_complete(&self, record: &IterationRecord);

    /// Called with the terminal result
    fn on_run_complete(&self, _result: &RunResult) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl EnhancementProgress for NoProgress {
    fn on_iteration_start(&self, _index: u32, _likelihood: f64) {}
    fn on_routing_complete(&self, _decision: &RoutingDecision) {}
    fn on_agent_complete(&self, _result: &AgentResult) {}
    fn on_iteration_complete(&self, _record: &IterationRecord) {}
}
