//! Facial expression state and the preserve/correct decision derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Detected facial expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionType {
    #[default]
    Neutral,
    BigLaugh,
    Crying,
    Surprise,
    Anger,
    Other,
}

impl ExpressionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionType::Neutral => "neutral",
            ExpressionType::BigLaugh => "big_laugh",
            ExpressionType::Crying => "crying",
            ExpressionType::Surprise => "surprise",
            ExpressionType::Anger => "anger",
            ExpressionType::Other => "other",
        }
    }

    /// Human-readable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ExpressionType::Neutral => "neutral",
            ExpressionType::BigLaugh => "big laugh",
            ExpressionType::Crying => "crying",
            ExpressionType::Surprise => "surprise",
            ExpressionType::Anger => "anger",
            ExpressionType::Other => "other",
        }
    }

    /// Intense expressions are the only ones that can be corrected.
    pub fn is_intense(&self) -> bool {
        matches!(
            self,
            ExpressionType::BigLaugh
                | ExpressionType::Crying
                | ExpressionType::Surprise
                | ExpressionType::Anger
        )
    }

    /// Unknown labels become [`ExpressionType::Other`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(ExpressionType::Other)
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpressionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "neutral" => Ok(ExpressionType::Neutral),
            "big_laugh" | "laugh" => Ok(ExpressionType::BigLaugh),
            "crying" | "cry" => Ok(ExpressionType::Crying),
            "surprise" | "surprised" => Ok(ExpressionType::Surprise),
            "anger" | "angry" => Ok(ExpressionType::Anger),
            "other" => Ok(ExpressionType::Other),
            _ => Err(format!("Invalid ExpressionType: {}", s)),
        }
    }
}

/// Whether the facial expression is left untouched or actively fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionMode {
    #[default]
    Preserve,
    Correct,
}

impl ExpressionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpressionMode::Preserve => "preserve",
            ExpressionMode::Correct => "correct",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, ExpressionMode::Correct)
    }
}

impl fmt::Display for ExpressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpressionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preserve" => Ok(ExpressionMode::Preserve),
            "correct" => Ok(ExpressionMode::Correct),
            _ => Err(format!("Invalid ExpressionMode: {}", s)),
        }
    }
}

/// Result of the facial-expression analysis for one image.
///
/// `correction_needed` is always derived from the other fields; use
/// [`ExpressionState::new`] rather than building the struct by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionState {
    pub expression_type: ExpressionType,
    pub is_natural: bool,
    pub issues: Vec<String>,
    #[serde(default)]
    pub muscles_affected: Vec<String>,
    pub correction_needed: bool,
}

impl ExpressionState {
    pub fn new(expression_type: ExpressionType, is_natural: bool, issues: Vec<String>) -> Self {
        let correction_needed = expression_type.is_intense() && !is_natural && !issues.is_empty();
        Self {
            expression_type,
            is_natural,
            issues,
            muscles_affected: Vec::new(),
            correction_needed,
        }
    }

    /// Neutral, natural, nothing to fix.
    pub fn neutral() -> Self {
        Self::new(ExpressionType::Neutral, true, Vec::new())
    }

    pub fn with_muscles(mut self, muscles: Vec<String>) -> Self {
        self.muscles_affected = muscles;
        self
    }

    pub fn mode(&self) -> ExpressionMode {
        if self.correction_needed {
            ExpressionMode::Correct
        } else {
            ExpressionMode::Preserve
        }
    }
}

impl Default for ExpressionState {
    fn default() -> Self {
        Self::neutral()
    }
}
