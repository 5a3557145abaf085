//! Lenient JSON extraction from model replies.
//!
//! Models wrap JSON in code fences or prose. The first balanced object is
//! taken; anything around it is ignored.

use crate::core::error::DomainError;
use crate::core::text::preview;
use serde_json::Value;

const PREVIEW_BYTES: usize = 120;

/// Parse the first JSON object found in `reply`.
pub fn parse_json_object(reply: &str) -> Result<Value, DomainError> {
    let candidate = extract_json_object(reply)
        .ok_or_else(|| DomainError::NoJsonObject(preview(reply.trim(), PREVIEW_BYTES)))?;
    let value: Value = serde_json::from_str(candidate)
        .map_err(|e| DomainError::MalformedJson(e.to_string()))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(DomainError::NoJsonObject(preview(candidate, PREVIEW_BYTES)))
    }
}

/// Slice of the first balanced `{...}` in `text`, aware of strings and escapes.
///
/// Fenced blocks (```` ```json ```` or bare ```` ``` ````) are searched first.
pub fn extract_json_object(text: &str) -> Option<&str> {
    if let Some(fenced) = fenced_block(text)
        && let Some(object) = first_balanced_object(fenced)
    {
        return Some(object);
    }
    first_balanced_object(text)
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_ticks = &text[start + 3..];
    // skip the language tag line
    let body_start = after_ticks.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_ticks[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}

fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// String field, or `None` when absent, null, empty or not a string.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Array of strings; non-string entries are skipped, a wrong type yields `None`.
pub fn string_list(value: &Value, key: &str) -> Option<Vec<String>> {
    let items = value.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Numeric field; numeric strings are accepted too.
pub fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_json() {
        let v = parse_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_fenced_json() {
        let reply = "Here you go:\n```json\n{\"a\": {\"b\": 2}}\n```\nThanks";
        let v = parse_json_object(reply).unwrap();
        assert_eq!(v["a"]["b"], 2);
    }

    #[test]
    fn test_json_embedded_in_prose() {
        let reply = "I chose {\"agents\": [\"color\"]} because of saturation.";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"agents\": [\"color\"]}")
        );
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let reply = r#"{"reasoning": "use } and { freely \" ok", "n": 1} trailing }"#;
        let v = parse_json_object(reply).unwrap();
        assert_eq!(v["n"], 1);
    }

    #[test]
    fn test_no_object() {
        let err = parse_json_object("I cannot help with that").unwrap_err();
        assert!(matches!(err, DomainError::NoJsonObject(_)));
    }

    #[test]
    fn test_unbalanced_object() {
        let err = parse_json_object("{\"a\": [1, 2").unwrap_err();
        assert!(matches!(err, DomainError::NoJsonObject(_)));
    }

    #[test]
    fn test_malformed_object() {
        let err = parse_json_object("{\"a\": nope}").unwrap_err();
        assert!(matches!(err, DomainError::MalformedJson(_)));
    }

    #[test]
    fn test_field_helpers() {
        let v: Value = serde_json::json!({
            "s": "  text ",
            "empty": "",
            "list": ["a", 3, " b "],
            "n": 0.25,
            "ns": "0.3",
            "wrong": {"x": 1}
        });
        assert_eq!(str_field(&v, "s"), Some("text"));
        assert_eq!(str_field(&v, "empty"), None);
        assert_eq!(string_list(&v, "list"), Some(vec!["a".into(), "b".into()]));
        assert_eq!(string_list(&v, "wrong"), None);
        assert_eq!(number_field(&v, "n"), Some(0.25));
        assert_eq!(number_field(&v, "ns"), Some(0.3));
        assert_eq!(number_field(&v, "wrong"), None);
    }
}
