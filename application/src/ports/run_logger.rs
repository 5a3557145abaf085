//! Port for structured run-event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port records routing decisions,
//! agent results and iteration outcomes in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured run event.
pub struct RunEvent {
    /// Event type identifier (`routing_decision`, `agent_result`, `iteration`, `run_complete`).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events.
///
/// `log` is synchronous and infallible; implementations swallow write errors.
pub trait RunEventLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunLogger;

impl RunEventLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
