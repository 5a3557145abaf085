//! AI-confidence bands.
//!
//! Bands are defined over the realism score `1 - likelihood`: very low at
//! 0.85 and above, low from 0.65, medium from 0.45, high from 0.25, very
//! high below that. They are expressed here on the likelihood directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How confidently an image reads as AI-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AiConfidenceLevel {
    pub fn from_likelihood(likelihood: f64) -> Self {
        let likelihood = likelihood.clamp(0.0, 1.0);
        if likelihood <= 0.15 {
            AiConfidenceLevel::VeryLow
        } else if likelihood <= 0.35 {
            AiConfidenceLevel::Low
        } else if likelihood <= 0.55 {
            AiConfidenceLevel::Medium
        } else if likelihood <= 0.75 {
            AiConfidenceLevel::High
        } else {
            AiConfidenceLevel::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AiConfidenceLevel::VeryLow => "very_low",
            AiConfidenceLevel::Low => "low",
            AiConfidenceLevel::Medium => "medium",
            AiConfidenceLevel::High => "high",
            AiConfidenceLevel::VeryHigh => "very_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AiConfidenceLevel::VeryLow => "very low",
            AiConfidenceLevel::Low => "low",
            AiConfidenceLevel::Medium => "medium",
            AiConfidenceLevel::High => "high",
            AiConfidenceLevel::VeryHigh => "very high",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AiConfidenceLevel::VeryLow => "almost no AI traces, the image looks very real",
            AiConfidenceLevel::Low => "slight AI traces, the image looks fairly real",
            AiConfidenceLevel::Medium => "moderate AI traces, some AI features remain",
            AiConfidenceLevel::High => "clear AI traces, AI features are noticeable",
            AiConfidenceLevel::VeryHigh => "severe AI traces, the image is obviously generated",
        }
    }
}

impl fmt::Display for AiConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_follow_realism_cutoffs() {
        assert_eq!(AiConfidenceLevel::from_likelihood(0.05), AiConfidenceLevel::VeryLow);
        assert_eq!(AiConfidenceLevel::from_likelihood(0.15), AiConfidenceLevel::VeryLow);
        assert_eq!(AiConfidenceLevel::from_likelihood(0.3), AiConfidenceLevel::Low);
        assert_eq!(AiConfidenceLevel::from_likelihood(0.5), AiConfidenceLevel::Medium);
        assert_eq!(AiConfidenceLevel::from_likelihood(0.7), AiConfidenceLevel::High);
        assert_eq!(AiConfidenceLevel::from_likelihood(0.8), AiConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_out_of_range_likelihood_is_clamped() {
        assert_eq!(AiConfidenceLevel::from_likelihood(-1.0), AiConfidenceLevel::VeryLow);
        assert_eq!(AiConfidenceLevel::from_likelihood(3.0), AiConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&AiConfidenceLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        assert_eq!(AiConfidenceLevel::VeryLow.label(), "very low");
    }
}
