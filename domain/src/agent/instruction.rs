//! Structured per-expert directive.

use crate::agent::kind::AgentKind;
use crate::core::text::{contains_ignore_case, join_clauses};
use crate::signal::expression::{ExpressionMode, ExpressionType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterrent appended to the negative directive while preserving the expression.
pub const EXPRESSION_DETERRENT: &str = "altered expression, different emotion, changed pose";

/// Clause appended to the preserve directive while preserving the expression.
pub const EXPRESSION_PRESERVATION_CLAUSE: &str = "preserve exact facial expression";

/// How hard an expert is asked to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    #[default]
    Medium,
    Strong,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Medium => "medium",
            Intensity::Strong => "strong",
        }
    }

    /// Human-readable strength label used in agent descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Light => "subtle",
            Intensity::Medium => "moderate",
            Intensity::Strong => "strong",
        }
    }

    /// Denoising strength used when a reply names an intensity but no strength.
    pub fn default_denoising(&self) -> f64 {
        match self {
            Intensity::Light => 0.12,
            Intensity::Medium => 0.20,
            Intensity::Strong => 0.30,
        }
    }

    /// Unknown values become [`Intensity::Medium`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "light" | "low" | "subtle" => Intensity::Light,
            "strong" | "high" => Intensity::Strong,
            _ => Intensity::Medium,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured directive handed to one expert for one iteration.
///
/// Created fresh by the router each iteration and never mutated afterwards;
/// the `with_*` builders are only used while it is being assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInstruction {
    pub agent_kind: AgentKind,
    /// What to add or enhance
    pub positive_directive: String,
    /// What to avoid or remove
    pub negative_directive: String,
    pub intensity: Intensity,
    pub specific_steps: Vec<String>,
    pub target_areas: Vec<String>,
    /// Identity/structure that must survive the edit
    pub preserve_directive: String,
    /// Expression correction, only honoured in correct mode
    pub correct_directive: String,
    pub denoising_strength: f64,
    pub expression_mode: ExpressionMode,
    pub expression_type: ExpressionType,
    pub expression_issues: Vec<String>,
}

impl AgentInstruction {
    pub fn new(
        agent_kind: AgentKind,
        positive_directive: impl Into<String>,
        negative_directive: impl Into<String>,
    ) -> Self {
        Self {
            agent_kind,
            positive_directive: positive_directive.into(),
            negative_directive: negative_directive.into(),
            intensity: Intensity::Medium,
            specific_steps: Vec::new(),
            target_areas: Vec::new(),
            preserve_directive: String::new(),
            correct_directive: String::new(),
            denoising_strength: Intensity::Medium.default_denoising(),
            expression_mode: ExpressionMode::Preserve,
            expression_type: ExpressionType::Neutral,
            expression_issues: Vec::new(),
        }
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_steps<S: Into<String>>(mut self, steps: impl IntoIterator<Item = S>) -> Self {
        self.specific_steps = steps.into_iter().map(Into::into).collect();
        self
    }

    /// Target areas form a set; duplicates are dropped, first occurrence wins.
    pub fn with_target_areas<S: Into<String>>(mut self, areas: impl IntoIterator<Item = S>) -> Self {
        self.target_areas.clear();
        for area in areas {
            let area = area.into();
            if !self.target_areas.contains(&area) {
                self.target_areas.push(area);
            }
        }
        self
    }

    pub fn with_preserve(mut self, preserve: impl Into<String>) -> Self {
        self.preserve_directive = preserve.into();
        self
    }

    pub fn with_correct(mut self, correct: impl Into<String>) -> Self {
        self.correct_directive = correct.into();
        self
    }

    /// Clamped to [0, 1]; non-finite values fall back to the intensity default.
    pub fn with_denoising(mut self, strength: f64) -> Self {
        self.denoising_strength = if strength.is_finite() {
            strength.clamp(0.0, 1.0)
        } else {
            self.intensity.default_denoising()
        };
        self
    }

    pub fn with_expression(
        mut self,
        mode: ExpressionMode,
        expression_type: ExpressionType,
        issues: Vec<String>,
    ) -> Self {
        self.expression_mode = mode;
        self.expression_type = expression_type;
        self.expression_issues = issues;
        self
    }

    /// In preserve mode, make sure the negative side deters expression changes
    /// and the preserve side names the expression explicitly.
    pub fn with_preservation_guards(mut self) -> Self {
        if self.expression_mode != ExpressionMode::Preserve {
            return self;
        }
        if !contains_ignore_case(&self.negative_directive, "altered expression") {
            self.negative_directive =
                join_clauses([self.negative_directive.as_str(), EXPRESSION_DETERRENT]);
        }
        if !contains_ignore_case(&self.preserve_directive, "facial expression") {
            self.preserve_directive =
                join_clauses([self.preserve_directive.as_str(), EXPRESSION_PRESERVATION_CLAUSE]);
        }
        self
    }

    /// Comma-joined target areas, or `global` when none were named.
    pub fn target_summary(&self) -> String {
        if self.target_areas.is_empty() {
            "global".to_string()
        } else {
            self.target_areas.join(", ")
        }
    }
}
