use crate::error::PatternError;
use crate::parse::looks_like_pattern;
use crate::types::Pattern;
use crate::util;
use crate::UNBOUNDED;
use serde_json::Value;
use tracing::debug;

/// Decides whether a value satisfies an expected fixture string.
///
/// The snapshot reconciler only depends on this trait, so a harness can plug
/// in its own placeholder language.
pub trait Matcher: Send + Sync {
    /// `pattern` is either a placeholder (`@integer@`) or a literal string.
    fn matches(&self, value: &Value, pattern: &str) -> bool;
}

/// The built-in placeholder matcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl PatternMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Strict variant of [`Matcher::matches`]: parse and evaluation errors are
    /// reported instead of being treated as a mismatch.
    pub fn match_pattern(&self, value: &Value, pattern: &str) -> Result<bool, PatternError> {
        Pattern::parse(pattern)?.matches(value)
    }

    /// Structural match of an actual document against an expected one that
    /// may contain placeholders at any depth.
    pub fn match_values(&self, actual: &Value, expected: &Value) -> bool {
        match expected {
            Value::String(s) if looks_like_pattern(s) => self.match_string(actual, s),
            Value::Object(expected_map) => {
                let Value::Object(actual_map) = actual else {
                    return false;
                };
                if actual_map.keys().any(|key| !expected_map.contains_key(key)) {
                    return false;
                }
                expected_map.iter().all(|(key, expected_value)| match actual_map.get(key) {
                    Some(actual_value) => self.match_values(actual_value, expected_value),
                    None => is_optional(expected_value),
                })
            }
            Value::Array(expected_items) => {
                let Value::Array(actual_items) = actual else {
                    return false;
                };
                let (head, unbounded) = match expected_items.split_last() {
                    Some((Value::String(last), head)) if last == UNBOUNDED => (head, true),
                    _ => (expected_items.as_slice(), false),
                };
                if actual_items.len() < head.len() || (!unbounded && actual_items.len() != head.len()) {
                    return false;
                }
                head.iter()
                    .zip(actual_items)
                    .all(|(expected_item, actual_item)| self.match_values(actual_item, expected_item))
            }
            other => util::loose_eq(actual, other),
        }
    }

    /// Matches two texts, structurally when both are JSON documents.
    pub fn match_text(&self, actual: &str, expected: &str) -> bool {
        match (
            serde_json::from_str::<Value>(actual),
            serde_json::from_str::<Value>(expected),
        ) {
            (Ok(actual), Ok(expected)) => self.match_values(&actual, &expected),
            _ => self.matches(&Value::String(actual.to_string()), expected),
        }
    }

    fn match_string(&self, value: &Value, expected: &str) -> bool {
        if !looks_like_pattern(expected) {
            return value.as_str() == Some(expected);
        }
        match Pattern::parse(expected) {
            Ok(pattern) => pattern.matches(value).unwrap_or_else(|err| {
                debug!(pattern = expected, error = %err, "pattern evaluation failed");
                false
            }),
            Err(err) => {
                debug!(pattern = expected, error = %err, "not a valid pattern, comparing literally");
                value.as_str() == Some(expected)
            }
        }
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, value: &Value, pattern: &str) -> bool {
        self.match_string(value, pattern)
    }
}

fn is_optional(expected: &Value) -> bool {
    match expected {
        Value::String(s) if looks_like_pattern(s) => {
            Pattern::parse(s).map(|p| p.is_optional()).unwrap_or(false)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_patterns() {
        let m = PatternMatcher::new();
        assert!(m.matches(&json!("x"), "@string@"));
        assert!(m.matches(&json!(42), "@integer@"));
        assert!(!m.matches(&json!(42), "@string@"));
        assert!(m.matches(&json!(4.2), "@double@"));
        assert!(m.matches(&json!(true), "@boolean@"));
        assert!(m.matches(&Value::Null, "@null@"));
        assert!(!m.matches(&Value::Null, "@string@"));
        assert!(m.matches(&json!({"a": 1}), "@*@"));
        assert!(m.matches(&json!([1]), "@wildcard@"));
        assert!(m.matches(&json!("anything"), "@...@"));
        assert!(m.matches(&json!("8f4b0d2e-6c1a-4b7e-9a3f-2d5c8e1b7a90"), "@uuid@"));
        assert!(!m.matches(&json!("not-a-uuid"), "@uuid@"));
    }

    #[test]
    fn test_literal_strings() {
        let m = PatternMatcher::new();
        assert!(m.matches(&json!("plain"), "plain"));
        assert!(!m.matches(&json!("plain"), "other"));
        assert!(m.matches(&json!("@alice"), "@alice"));
        assert!(m.matches(&json!("@str@"), "@str@"));
        assert!(!m.matches(&json!("x"), "@str@"));
    }

    #[test]
    fn test_invalid_expander_never_matches() {
        let m = PatternMatcher::new();
        assert!(!m.matches(&json!("x"), "@string@.matchRegex('(')"));
        assert!(m.match_pattern(&json!("x"), "@string@.matchRegex('(')").is_err());
    }

    #[test]
    fn test_match_values_objects() {
        let m = PatternMatcher::new();
        assert!(m.match_values(&json!({"a": 1, "b": "x"}), &json!({"b": "@string@", "a": "@integer@"})));
        assert!(!m.match_values(&json!({"a": 1, "extra": 2}), &json!({"a": 1})));
        assert!(!m.match_values(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(m.match_values(&json!({"a": 1}), &json!({"a": 1, "b": "@string@.optional()"})));
        assert!(!m.match_values(&json!([]), &json!({})));
    }

    #[test]
    fn test_match_values_lists() {
        let m = PatternMatcher::new();
        assert!(m.match_values(&json!([1, 2, 3]), &json!([1, "@integer@", 3])));
        assert!(!m.match_values(&json!([1, 2, 3]), &json!([1, 2])));
        assert!(m.match_values(&json!([1, 2, 3]), &json!([1, "@...@"])));
        assert!(m.match_values(&json!([1]), &json!([1, "@...@"])));
        assert!(!m.match_values(&json!([]), &json!([1, "@...@"])));
        assert!(m.match_values(&json!({"items": []}), &json!({"items": "@array@"})));
    }

    #[test]
    fn test_match_values_numbers() {
        let m = PatternMatcher::new();
        assert!(m.match_values(&json!(1.0), &json!(1)));
        assert!(!m.match_values(&json!(1.5), &json!(1)));
        assert!(!m.match_values(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_match_text() {
        let m = PatternMatcher::new();
        assert!(m.match_text(r#"{"id": 5}"#, r#"{"id": "@integer@"}"#));
        assert!(!m.match_text(r#"{"id": "5"}"#, r#"{"id": "@integer@"}"#));
        assert!(m.match_text("hello", "@string@.startsWith('he')"));
        assert!(m.match_text("hello", "hello"));
    }
}
