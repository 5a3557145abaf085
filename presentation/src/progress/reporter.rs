//! Progress reporting for enhancement runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use realism_application::ports::progress::EnhancementProgress;
use realism_domain::{AgentKind, AgentResult, IterationRecord, RoutingDecision, RunResult};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per iteration
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancementProgress for ProgressReporter {
    fn on_iteration_start(&self, index: u32, likelihood: f64) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("Iteration {}", index));
        pb.set_message(format!("routing (AI likelihood {:.0}%)", likelihood * 100.0));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_routing_complete(&self, decision: &RoutingDecision) {
        let agents = decision
            .priority_order()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        self.with_bar(|pb| {
            if agents.is_empty() {
                pb.println(format!("  {} no agents selected", "->".cyan()));
            } else {
                pb.println(format!("  {} {}", "->".cyan(), agents));
            }
        });
    }

    fn on_agent_start(&self, kind: AgentKind) {
        self.with_bar(|pb| pb.set_message(format!("{} agent editing...", kind)));
    }

    fn on_agent_complete(&self, result: &AgentResult) {
        let line = if result.success {
            format!("  {} {}", "v".green(), result.description)
        } else {
            format!(
                "  {} {} ({})",
                "x".red(),
                result.description,
                result.error_message.as_deref().unwrap_or("unknown error")
            )
        };
        self.with_bar(|pb| pb.println(line));
    }

    fn on_iteration_complete(&self, record: &IterationRecord) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} AI likelihood {:.0}% -> {:.0}%",
                "done".green(),
                record.likelihood_before * 100.0,
                record.likelihood_after * 100.0
            ));
        }
    }

    fn on_run_complete(&self, _result: &RunResult) {
        if let Ok(mut bar) = self.bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_and_clear();
        }
    }
}
