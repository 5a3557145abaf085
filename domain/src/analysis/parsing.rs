//! Parsers for the vision collaborator's replies.

use crate::analysis::entities::{SceneClassification, UNKNOWN_LIKELIHOOD};
use crate::core::error::DomainError;
use crate::core::json::{number_field, parse_json_object, str_field, string_list};
use crate::core::scene::UNKNOWN_SCENE;
use crate::signal::entities::{Dimension, Severity, Signal};
use crate::signal::expression::{ExpressionState, ExpressionType};
use serde_json::Value;

/// `{"primary_scene", "secondary_attributes", "ai_likelihood"}`.
pub fn parse_classification(reply: &str) -> Result<SceneClassification, DomainError> {
    let json = parse_json_object(reply)?;
    let scene = str_field(&json, "primary_scene")
        .unwrap_or(UNKNOWN_SCENE)
        .to_lowercase();
    let likelihood = number_field(&json, "ai_likelihood").unwrap_or(UNKNOWN_LIKELIHOOD);
    Ok(SceneClassification::new(scene, likelihood)
        .with_attributes(string_list(&json, "secondary_attributes").unwrap_or_default()))
}

/// `{"fake_signals": [{"signal", "severity", "dimension"}]}`.
///
/// Entries without a description are skipped.
pub fn parse_signals(reply: &str) -> Result<Vec<Signal>, DomainError> {
    let json = parse_json_object(reply)?;
    let Some(items) = json.get("fake_signals").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    Ok(items
        .iter()
        .filter_map(|item| {
            let description = str_field(item, "signal")?;
            let severity = str_field(item, "severity")
                .map(Severity::parse_lenient)
                .unwrap_or(Severity::Low);
            let dimension = str_field(item, "dimension")
                .map(Dimension::parse_lenient)
                .unwrap_or_default();
            Some(Signal::new(description, severity).with_dimension(dimension))
        })
        .collect())
}

/// `{"has_face", "expression_type", "expression_natural", "expression_issues", "muscle_problems"}`.
///
/// No face means neutral.
pub fn parse_expression(reply: &str) -> Result<ExpressionState, DomainError> {
    let json = parse_json_object(reply)?;
    let has_face = json.get("has_face").and_then(Value::as_bool).unwrap_or(false);
    if !has_face {
        return Ok(ExpressionState::neutral());
    }
    let expression_type = str_field(&json, "expression_type")
        .map(ExpressionType::parse_lenient)
        .unwrap_or_default();
    let natural = json
        .get("expression_natural")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    let issues = string_list(&json, "expression_issues").unwrap_or_default();
    let muscles = string_list(&json, "muscle_problems").unwrap_or_default();
    Ok(ExpressionState::new(expression_type, natural, issues).with_muscles(muscles))
}
