//! Detected AI-generation signals.

use crate::core::text::contains_ignore_case;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How visible an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Barely noticeable
    #[default]
    Low,
    /// Noticeable on inspection
    Medium,
    /// Obviously artificial
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Lenient parse: unknown values become [`Severity::Low`].
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" | "med" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(format!("Invalid Severity: {}", s)),
        }
    }
}

/// Topical dimension the detector tagged a signal with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Skin,
    Lighting,
    Texture,
    Geometry,
    Color,
    #[default]
    General,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Skin => "skin",
            Dimension::Lighting => "lighting",
            Dimension::Texture => "texture",
            Dimension::Geometry => "geometry",
            Dimension::Color => "color",
            Dimension::General => "general",
        }
    }

    /// Unknown dimensions collapse to [`Dimension::General`].
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "skin" => Dimension::Skin,
            "lighting" => Dimension::Lighting,
            "texture" => Dimension::Texture,
            "geometry" => Dimension::Geometry,
            "color" | "colour" => Dimension::Color,
            _ => Dimension::General,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected indicator that part of the image looks generated.
///
/// Immutable once produced by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Free-text description of the artifact
    pub description: String,
    pub severity: Severity,
    #[serde(default)]
    pub dimension: Dimension,
}

impl Signal {
    pub fn new(description: impl Into<String>, severity: Severity) -> Self {
        Self {
            description: description.into(),
            severity,
            dimension: Dimension::General,
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    /// True if the description contains any keyword, ignoring case.
    pub fn matches_any(&self, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .any(|kw| contains_ignore_case(&self.description, kw))
    }
}

/// Signals whose description matches any of the keywords.
pub fn find_relevant<'a>(signals: &'a [Signal], keywords: &[&str]) -> Vec<&'a Signal> {
    signals.iter().filter(|s| s.matches_any(keywords)).collect()
}

/// One line per signal: `- [HIGH] description`.
pub fn format_signal_list(signals: &[Signal]) -> String {
    signals
        .iter()
        .map(|s| {
            format!(
                "- [{}] ({}) {}",
                s.severity.as_str().to_uppercase(),
                s.dimension,
                s.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
