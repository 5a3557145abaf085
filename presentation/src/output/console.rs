//! Console output formatter for run results

use colored::Colorize;
use realism_domain::{
    AgentResult, ExpressionState, ExpressionType, ImageAnalysis, IterationRecord, RunResult,
    Signal, StoppedReason,
};

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run
    pub fn format(result: &RunResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Realism Enhancement"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Scene:".cyan().bold(),
            result.scene_type
        ));
        output.push_str(&format!(
            "{} {}\n",
            "AI likelihood:".cyan().bold(),
            Self::likelihood_change(result.initial_likelihood, result.final_likelihood)
        ));
        output.push_str(&format!(
            "{} {} -> {} ({})\n",
            "AI confidence:".cyan().bold(),
            result.initial_confidence.label(),
            result.final_confidence.label(),
            result.final_confidence.describe()
        ));
        if let Some(expression) = Self::expression_line(&result.expression) {
            output.push_str(&format!("{} {}\n", "Expression:".cyan().bold(), expression));
        }

        for record in &result.iterations {
            output.push_str(&Self::iteration(record));
        }

        output.push_str(&Self::section_header("Result"));
        output.push_str(&format!(
            "\n{} {}\n",
            "Stopped:".bold(),
            Self::stopped_reason(result.stopped_reason)
        ));
        if let Some(error) = &result.error_message {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }
        if !result.final_signals.is_empty() {
            output.push_str(&format!("\n{}\n", "Remaining signals:".yellow().bold()));
            output.push_str(&Self::signal_list(&result.final_signals));
        }
        output.push_str(&format!("\n{}\n", result.summary));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &RunResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Summary line plus the likelihood change
    pub fn format_summary(result: &RunResult) -> String {
        format!(
            "{} {}\n{}\n",
            "AI likelihood:".bold(),
            Self::likelihood_change(result.initial_likelihood, result.final_likelihood),
            result.summary
        )
    }

    /// Format an analysis without enhancement
    pub fn format_analysis(analysis: &ImageAnalysis) -> String {
        let mut output = String::new();
        let classification = &analysis.classification;

        output.push_str(&Self::header("Image Analysis"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Scene:".cyan().bold(),
            classification.primary_scene
        ));
        if !classification.attributes.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Attributes:".cyan().bold(),
                classification.attributes.join(", ")
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "AI likelihood:".cyan().bold(),
            Self::percent(classification.ai_likelihood)
        ));
        if let Some(expression) = Self::expression_line(&analysis.expression) {
            output.push_str(&format!("{} {}\n", "Expression:".cyan().bold(), expression));
        }

        output.push_str(&Self::section_header("Signals"));
        if analysis.signals.is_empty() {
            output.push_str(&format!("\n  {}\n", "none detected".green()));
        } else {
            output.push('\n');
            output.push_str(&Self::signal_list(&analysis.signals));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_analysis_json(analysis: &ImageAnalysis) -> String {
        serde_json::to_string_pretty(analysis).unwrap_or_else(|_| "{}".to_string())
    }

    fn iteration(record: &IterationRecord) -> String {
        let mut output = Self::section_header(&format!("Iteration {}", record.index));
        output.push_str(&format!(
            "\n{} {}\n",
            "Routing:".bold(),
            record.decision.reasoning
        ));
        for result in &record.agent_results {
            output.push_str(&Self::agent_result(result));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Likelihood:".bold(),
            Self::likelihood_change(record.likelihood_before, record.likelihood_after)
        ));
        output
    }

    fn agent_result(result: &AgentResult) -> String {
        if result.success {
            let mut line = format!(
                "  {} {}\n",
                format!("v {}", result.agent_kind).green().bold(),
                result.description
            );
            for change in &result.changes_applied {
                line.push_str(&format!("      - {}\n", change));
            }
            line
        } else {
            format!(
                "  {} {}\n",
                format!("x {}", result.agent_kind).red().bold(),
                result.error_message.as_deref().unwrap_or("Unknown")
            )
        }
    }

    fn signal_list(signals: &[Signal]) -> String {
        signals
            .iter()
            .map(|s| {
                format!(
                    "  * [{}/{}] {}\n",
                    s.dimension.as_str(),
                    s.severity.as_str(),
                    s.description
                )
            })
            .collect()
    }

    fn expression_line(expression: &ExpressionState) -> Option<String> {
        if expression.expression_type == ExpressionType::Neutral && !expression.correction_needed {
            return None;
        }
        let mode = if expression.correction_needed {
            "correct".yellow().to_string()
        } else {
            "preserve".to_string()
        };
        Some(format!("{} ({})", expression.expression_type.label(), mode))
    }

    fn stopped_reason(reason: StoppedReason) -> String {
        let text = reason.describe();
        if reason.is_failure() {
            text.red().to_string()
        } else {
            text.green().to_string()
        }
    }

    fn likelihood_change(before: f64, after: f64) -> String {
        let arrow = format!("{} -> {}", Self::percent(before), Self::percent(after));
        if after < before {
            arrow.green().to_string()
        } else {
            arrow.yellow().to_string()
        }
    }

    fn percent(value: f64) -> String {
        format!("{:.0}%", value * 100.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
