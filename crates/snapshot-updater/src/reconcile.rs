//! Merging a new actual tree into a recorded expected tree.
//!
//! The output is what a human would commit as the new fixture: placeholders
//! that still match are kept, everything else becomes actual's literal, and
//! empty containers keep the `{}`/`[]` type the fixture used.

use crate::path::{self, child, Path, PathStep};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use snapshot_matcher::Matcher;
use tracing::debug;

/// Placeholders kept on update unless configured otherwise, in priority order.
pub const DEFAULT_MATCHER_PATTERNS: [&str; 11] = [
    "@string@",
    "@integer@",
    "@number@",
    "@double@",
    "@boolean@",
    "@array@",
    "@...@",
    "@null@",
    "@*@",
    "@wildcard@",
    "@uuid@",
];

pub fn default_matcher_patterns() -> Vec<String> {
    DEFAULT_MATCHER_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Replaces the value of every map entry named in `fields`, at any depth.
pub fn apply_field_overrides(value: &mut Value, fields: &IndexMap<String, String>) {
    if fields.is_empty() {
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                match fields.get(key) {
                    Some(replacement) => *field = Value::String(replacement.clone()),
                    None => apply_field_overrides(field, fields),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                apply_field_overrides(item, fields);
            }
        }
        _ => {}
    }
}

/// Value found at `path` in the original expected document, or `[]` when the
/// path does not resolve there.
pub fn original_empty_value(original: &Value, path: &[PathStep]) -> Value {
    path::get(original, path)
        .filter(|value| !value.is_null())
        .cloned()
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

/// Replaces every empty container of `expected` with the value at the same
/// path in `original`, so the merge can tell `{}` from `[]`.
pub fn recover_empty_containers(expected: &mut Value, original: &Value) {
    if !is_container(original) {
        return;
    }
    let mut path = Path::new();
    recover_children(expected, original, &mut path);
}

fn recover_children(node: &mut Value, original: &Value, path: &mut Path) {
    match node {
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                path.push(PathStep::Key(key.clone()));
                recover_value(value, original, path);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter_mut().enumerate() {
                path.push(PathStep::Index(index));
                recover_value(value, original, path);
                path.pop();
            }
        }
        _ => {}
    }
}

fn recover_value(value: &mut Value, original: &Value, path: &mut Path) {
    if is_empty_container(value) {
        *value = original_empty_value(original, path);
    } else if is_container(value) {
        recover_children(value, original, path);
    }
}

pub struct Reconciler<'a> {
    matcher: &'a dyn Matcher,
    patterns: &'a [String],
    fields: &'a IndexMap<String, String>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        matcher: &'a dyn Matcher,
        patterns: &'a [String],
        fields: &'a IndexMap<String, String>,
    ) -> Self {
        Self {
            matcher,
            patterns,
            fields,
        }
    }

    /// Field overrides followed by the merge.
    pub fn reconcile(&self, mut actual: Value, expected: &Value) -> Value {
        apply_field_overrides(&mut actual, self.fields);
        self.merge(actual, expected)
    }

    /// Walks `actual` and pulls still-valid placeholders back from `expected`.
    ///
    /// Overridden fields are final and left alone.
    pub fn merge(&self, mut actual: Value, expected: &Value) -> Value {
        match &mut actual {
            Value::Object(map) => {
                for (key, field) in map.iter_mut() {
                    if self.fields.contains_key(key) {
                        continue;
                    }
                    self.merge_field(field, child(expected, &PathStep::Key(key.clone())));
                }
            }
            Value::Array(items) => {
                for (index, field) in items.iter_mut().enumerate() {
                    self.merge_field(field, child(expected, &PathStep::Index(index)));
                }
            }
            _ => {}
        }
        actual
    }

    fn merge_field(&self, field: &mut Value, expected: Option<&Value>) {
        // A null expectation counts as no expectation.
        let expected = match expected {
            Some(value) if !value.is_null() => value,
            _ => return,
        };

        if is_container(field) {
            if is_empty_container(field) {
                *field = if expected.is_array() {
                    Value::Array(Vec::new())
                } else {
                    Value::Object(Map::new())
                };
                return;
            }
            // An empty expected object keeps all of actual's sub-keys.
            if is_container(expected) {
                let taken = std::mem::take(field);
                *field = self.merge(taken, expected);
                return;
            }
        }

        self.keep_matching_pattern(field, expected);
    }

    /// Only the first configured prefix is tried, even when its match fails.
    fn keep_matching_pattern(&self, field: &mut Value, expected: &Value) {
        let Value::String(pattern) = expected else {
            return;
        };
        let Some(prefix) = self.patterns.iter().find(|p| pattern.starts_with(p.as_str())) else {
            return;
        };
        if self.matcher.matches(field, pattern) {
            *field = expected.clone();
        } else {
            debug!(pattern = %pattern, prefix = %prefix, "placeholder no longer matches, recording actual value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use snapshot_matcher::PatternMatcher;

    fn reconcile(actual: Value, expected: Value, fields: &[(&str, &str)]) -> Value {
        let matcher = PatternMatcher::new();
        let patterns = default_matcher_patterns();
        let fields: IndexMap<String, String> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Reconciler::new(&matcher, &patterns, &fields).reconcile(actual, &expected)
    }

    #[test]
    fn test_keeps_matching_pattern() {
        assert_eq!(
            reconcile(json!({"id": 42}), json!({"id": "@integer@"}), &[]),
            json!({"id": "@integer@"})
        );
    }

    #[test]
    fn test_replaces_failing_pattern() {
        assert_eq!(
            reconcile(json!({"id": 42}), json!({"id": "@string@"}), &[]),
            json!({"id": 42})
        );
    }

    #[test]
    fn test_first_prefix_wins_even_when_it_fails() {
        // "@string@" is tried before "@*@" and fails; "@*@" is never consulted.
        let matcher = PatternMatcher::new();
        let patterns = vec!["@string@".to_string(), "@*@".to_string()];
        let fields = IndexMap::new();
        let reconciler = Reconciler::new(&matcher, &patterns, &fields);
        assert_eq!(
            reconciler.merge(json!({"v": 1}), &json!({"v": "@string@"})),
            json!({"v": 1})
        );
    }

    #[test]
    fn test_unconfigured_pattern_is_replaced() {
        assert_eq!(
            reconcile(json!({"v": "x"}), json!({"v": "@json@"}), &[]),
            json!({"v": "x"})
        );
    }

    #[test]
    fn test_pattern_with_expander_is_kept() {
        assert_eq!(
            reconcile(
                json!({"at": "2024-01-01T00:00:00Z"}),
                json!({"at": "@string@.isDateTime()"}),
                &[]
            ),
            json!({"at": "@string@.isDateTime()"})
        );
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        assert_eq!(
            reconcile(json!({"a": 1, "b": {"c": [1, 2]}}), json!({"a": "@integer@"}), &[]),
            json!({"a": "@integer@", "b": {"c": [1, 2]}})
        );
    }

    #[test]
    fn test_keys_only_in_expected_are_dropped() {
        assert_eq!(
            reconcile(json!({"a": 1}), json!({"a": 1, "gone": "@string@"}), &[]),
            json!({"a": 1})
        );
    }

    #[test]
    fn test_null_expected_passes_through() {
        assert_eq!(
            reconcile(json!({"a": {"b": 1}, "c": 2}), json!({"a": null, "c": null}), &[]),
            json!({"a": {"b": 1}, "c": 2})
        );
    }

    #[test]
    fn test_empty_container_takes_expected_type() {
        assert_eq!(
            reconcile(
                json!({"list": {}, "map": [], "scalar": []}),
                json!({"list": [], "map": {"x": 1}, "scalar": "@array@"}),
                &[]
            ),
            json!({"list": [], "map": {}, "scalar": {}})
        );
    }

    #[test]
    fn test_recurses_into_lists_and_maps() {
        assert_eq!(
            reconcile(
                json!({"items": [{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]}),
                json!({"items": [{"id": "@integer@", "name": "a"}, {"id": "@string@", "name": "b"}]}),
                &[]
            ),
            json!({"items": [{"id": "@integer@", "name": "a"}, {"id": 2, "name": "b"}]})
        );
    }

    #[test]
    fn test_container_against_scalar_pattern() {
        assert_eq!(
            reconcile(json!({"tags": ["a"]}), json!({"tags": "@array@"}), &[]),
            json!({"tags": "@array@"})
        );
        assert_eq!(
            reconcile(json!({"tags": ["a"]}), json!({"tags": "@string@"}), &[]),
            json!({"tags": ["a"]})
        );
    }

    #[test]
    fn test_merge_against_empty_expected_object() {
        assert_eq!(
            reconcile(json!({"meta": {"a": 1}}), json!({"meta": {}}), &[]),
            json!({"meta": {"a": 1}})
        );
    }

    #[test]
    fn test_field_override_beats_expected_pattern() {
        assert_eq!(
            reconcile(
                json!({"createdAt": "2024-01-01T00:00:00Z", "nested": [{"createdAt": 1}]}),
                json!({"createdAt": "@string@", "nested": [{"createdAt": "@integer@"}]}),
                &[("createdAt", "@string@.isDateTime()")]
            ),
            json!({
                "createdAt": "@string@.isDateTime()",
                "nested": [{"createdAt": "@string@.isDateTime()"}]
            })
        );
    }

    #[test]
    fn test_field_override_replaces_containers() {
        let mut value = json!({"a": {"b": 1}, "c": [{"a": []}]});
        let fields: IndexMap<String, String> = [("a".to_string(), "@*@".to_string())].into_iter().collect();
        apply_field_overrides(&mut value, &fields);
        assert_eq!(value, json!({"a": "@*@", "c": [{"a": "@*@"}]}));
    }

    #[test]
    fn test_original_empty_value() {
        let original = json!({"a": {"b": {}}, "c": [[]], "d": null});
        let key = |k: &str| PathStep::Key(k.to_string());
        assert_eq!(original_empty_value(&original, &[key("a"), key("b")]), json!({}));
        assert_eq!(original_empty_value(&original, &[key("c"), PathStep::Index(0)]), json!([]));
        assert_eq!(original_empty_value(&original, &[key("missing")]), json!([]));
        assert_eq!(original_empty_value(&original, &[key("d")]), json!([]));
    }

    #[test]
    fn test_recover_empty_containers() {
        let original = json!({"tags": [], "meta": {}, "items": [{"attrs": {}}]});
        let mut expected = json!({"tags": {}, "meta": [], "items": [{"attrs": []}], "extra": {}});
        recover_empty_containers(&mut expected, &original);
        assert_eq!(
            expected,
            json!({"tags": [], "meta": {}, "items": [{"attrs": {}}], "extra": []})
        );
    }

    #[test]
    fn test_recover_skips_scalar_original() {
        let mut expected = json!({"a": {}});
        recover_empty_containers(&mut expected, &json!("scalar"));
        assert_eq!(expected, json!({"a": {}}));
    }

    #[test]
    fn test_top_level_list() {
        assert_eq!(
            reconcile(json!([1, "x", {}]), json!(["@integer@", "@integer@", []]), &[]),
            json!(["@integer@", "x", []])
        );
    }
}
